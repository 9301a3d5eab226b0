//! Flattens one file into the ordered list of elements the runtime visits.
//!
//! Order: the file, enums, enum values, fields, methods, messages, services.
//! Messages are visited depth-first in pre-order; synthetic map-entry
//! messages are never yielded, but their `key`/`value` fields are.

use crate::descriptor::{Element, EnumDescriptor, MessageDescriptor, SchemaFile};

/// Returns every element of `file` in visitation order.
///
/// The iterator is finite; call again for a fresh sequence.
pub fn enumerate(file: &SchemaFile) -> impl Iterator<Item = Element<'_>> {
    let messages = all_messages(file, false);
    let field_owners = all_messages(file, true);
    let enums = all_enums(file, &messages);

    let values: Vec<Element<'_>> = enums
        .iter()
        .flat_map(|e| e.values().map(Element::EnumValue).collect::<Vec<_>>())
        .collect();
    let fields: Vec<Element<'_>> = field_owners
        .iter()
        .flat_map(|m| m.fields().map(Element::Field).collect::<Vec<_>>())
        .collect();
    let methods: Vec<Element<'_>> = file
        .services()
        .flat_map(|s| s.methods().map(Element::Method).collect::<Vec<_>>())
        .collect();

    std::iter::once(Element::File(file))
        .chain(enums.into_iter().map(Element::Enum))
        .chain(values)
        .chain(fields)
        .chain(methods)
        .chain(messages.into_iter().map(Element::Message))
        .chain(file.services().map(Element::Service))
}

/// Messages in pre-order, optionally including map entries.
fn all_messages(file: &SchemaFile, include_map_entries: bool) -> Vec<MessageDescriptor<'_>> {
    let mut out = Vec::new();
    for message in file.messages() {
        collect_messages(message, include_map_entries, &mut out);
    }
    out
}

fn collect_messages<'a>(
    message: MessageDescriptor<'a>,
    include_map_entries: bool,
    out: &mut Vec<MessageDescriptor<'a>>,
) {
    if message.is_map_entry() && !include_map_entries {
        return;
    }
    let nested: Vec<MessageDescriptor<'a>> = message.nested_messages().collect();
    out.push(message);
    for child in nested {
        collect_messages(child, include_map_entries, out);
    }
}

/// Top-level enums, then each message's immediate nested enums.
fn all_enums<'a>(file: &'a SchemaFile, messages: &[MessageDescriptor<'a>]) -> Vec<EnumDescriptor<'a>> {
    file.enums()
        .chain(messages.iter().flat_map(|m| m.nested_enums().collect::<Vec<_>>()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::ElementKind;
    use crate::testing::{enum_proto, field, file_with, map_entry, message, service};
    use std::collections::HashSet;

    /// ```text
    /// enum Top { TOP_A; TOP_B; }
    /// message A {
    ///   int32 a1 = 1; map<string, string> tags = 2;
    ///   message B {
    ///     int32 b1 = 1;
    ///     enum BE { BE_X; }
    ///     message C { int32 c1 = 1; }
    ///   }
    ///   enum AE { AE_X; }
    /// }
    /// message D { int32 d1 = 1; }
    /// service S { rpc Get; rpc List; }
    /// ```
    fn nested_file() -> SchemaFile {
        let c = message("C", vec![field("c1", 1)]);
        let mut b = message("B", vec![field("b1", 1)]);
        b.nested_type.push(c);
        b.enum_type.push(enum_proto("BE", &["BE_X"]));
        let mut a = message("A", vec![field("a1", 1), field("tags", 2)]);
        a.nested_type.push(b);
        a.nested_type.push(map_entry("TagsEntry"));
        a.enum_type.push(enum_proto("AE", &["AE_X"]));
        let d = message("D", vec![field("d1", 1)]);

        let mut proto = file_with("n.proto", "pkg", vec![a, d]);
        proto.enum_type.push(enum_proto("Top", &["TOP_A", "TOP_B"]));
        proto.service.push(service("S", &["Get", "List"]));
        SchemaFile::new(proto)
    }

    fn names(file: &SchemaFile) -> Vec<(ElementKind, String)> {
        enumerate(file)
            .map(|e| (e.kind(), e.full_name().to_string()))
            .collect()
    }

    #[test]
    fn visits_in_documented_order() {
        let file = nested_file();
        let got: Vec<String> = names(&file).into_iter().map(|(_, n)| n).collect();
        assert_eq!(
            got,
            vec![
                "n.proto",
                // enums: top-level, then per message in pre-order
                "pkg.Top",
                "pkg.A.AE",
                "pkg.A.B.BE",
                // values grouped by enum
                "pkg.Top.TOP_A",
                "pkg.Top.TOP_B",
                "pkg.A.AE.AE_X",
                "pkg.A.B.BE.BE_X",
                // fields grouped by owner, map entry fields included
                "pkg.A.a1",
                "pkg.A.tags",
                "pkg.A.B.b1",
                "pkg.A.B.C.c1",
                "pkg.A.TagsEntry.key",
                "pkg.A.TagsEntry.value",
                "pkg.D.d1",
                // methods
                "pkg.S.Get",
                "pkg.S.List",
                // messages, no map entry
                "pkg.A",
                "pkg.A.B",
                "pkg.A.B.C",
                "pkg.D",
                // services
                "pkg.S",
            ]
        );
    }

    #[test]
    fn never_yields_map_entry_messages() {
        let file = nested_file();
        assert!(enumerate(&file).all(|e| e.as_message().map_or(true, |m| !m.is_map_entry())));
    }

    #[test]
    fn visits_each_element_once() {
        let file = nested_file();
        let all = names(&file);
        let unique: HashSet<_> = all.iter().cloned().collect();
        assert_eq!(all.len(), unique.len());
    }

    #[test]
    fn handles_deep_nesting() {
        let depth = 12;
        let mut current = message("M0", vec![field("f", 1)]);
        for i in 1..depth {
            let mut parent = message(&format!("M{i}"), vec![field("f", 1)]);
            parent.nested_type.push(current);
            current = parent;
        }
        let file = SchemaFile::new(file_with("deep.proto", "", vec![current]));
        let all = names(&file);
        let count = |kind| all.iter().filter(|(k, _)| *k == kind).count();
        assert_eq!(count(ElementKind::Message), depth);
        assert_eq!(count(ElementKind::Field), depth);
    }

    #[test]
    fn is_restartable_by_calling_again() {
        let file = nested_file();
        assert_eq!(enumerate(&file).count(), enumerate(&file).count());
    }

    #[test]
    fn empty_file_yields_only_itself() {
        let file = SchemaFile::new(file_with("e.proto", "", vec![]));
        let all: Vec<_> = enumerate(&file).collect();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].kind(), ElementKind::File);
    }
}
