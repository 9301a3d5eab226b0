//! Read-only views over parsed protobuf descriptors.
//!
//! A [`SchemaFile`] owns one `FileDescriptorProto` produced by an external
//! schema compiler (for example `protoc --include_source_info
//! --descriptor_set_out`). Every other view borrows from it and records its
//! position in the descriptor tree as a source-code-info path, which is how
//! parents, comments and spans are looked up.

use prost::Message as _;
use prost_types::source_code_info::Location as ProtoLocation;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, FileDescriptorSet, MethodDescriptorProto, ServiceDescriptorProto,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::types::Location;

// Field numbers from google/protobuf/descriptor.proto.
const FILE_PACKAGE: i32 = 2;
const FILE_MESSAGE_TYPE: i32 = 4;
const FILE_ENUM_TYPE: i32 = 5;
const FILE_SERVICE: i32 = 6;
const FILE_SYNTAX: i32 = 12;
const MESSAGE_FIELD: i32 = 2;
const MESSAGE_NESTED_TYPE: i32 = 3;
const MESSAGE_ENUM_TYPE: i32 = 4;
const ENUM_VALUE: i32 = 2;
const SERVICE_METHOD: i32 = 2;

/// Errors reading descriptor sets.
#[derive(Debug, thiserror::Error, miette::Diagnostic)]
pub enum DescriptorError {
    /// IO error reading a descriptor set file.
    #[error("Failed to read descriptor set {path}: {source}")]
    #[diagnostic(code(protolint::descriptor::io))]
    Io {
        /// Path that failed to read.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// The bytes are not an encoded `FileDescriptorSet`.
    #[error("Failed to decode descriptor set: {0}")]
    #[diagnostic(
        code(protolint::descriptor::decode),
        help("produce the input with `protoc --include_source_info --descriptor_set_out=...`")
    )]
    Decode(#[from] prost::DecodeError),
}

/// Decodes a binary `FileDescriptorSet` into schema files, in set order.
///
/// # Errors
///
/// Returns an error if the bytes are not a valid descriptor set.
pub fn load_descriptor_set(bytes: &[u8]) -> Result<Vec<SchemaFile>, DescriptorError> {
    let set = FileDescriptorSet::decode(bytes)?;
    Ok(set.file.into_iter().map(SchemaFile::new).collect())
}

/// Reads and decodes a binary `FileDescriptorSet` from disk.
///
/// # Errors
///
/// Returns an error if the file cannot be read or decoded.
pub fn read_descriptor_set(path: &Path) -> Result<Vec<SchemaFile>, DescriptorError> {
    let bytes = std::fs::read(path).map_err(|e| DescriptorError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_descriptor_set(&bytes)
}

/// The concrete kind of a schema element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementKind {
    /// A `.proto` file.
    File,
    /// A message definition.
    Message,
    /// A message field.
    Field,
    /// An enum definition.
    Enum,
    /// A single enum value.
    EnumValue,
    /// A service definition.
    Service,
    /// A service method.
    Method,
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::File => "file",
            Self::Message => "message",
            Self::Field => "field",
            Self::Enum => "enum",
            Self::EnumValue => "enum_value",
            Self::Service => "service",
            Self::Method => "method",
        };
        f.write_str(s)
    }
}

/// Comment and span metadata attached to an element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceInfo<'a> {
    /// Comment directly above the element.
    pub leading_comments: &'a str,
    /// Comment trailing the element on the same line.
    pub trailing_comments: &'a str,
    /// Path of the enclosing file.
    pub file_path: &'a str,
    /// The enclosing file's header comment.
    pub file_header: &'a str,
    /// Raw protobuf span (0-indexed; 3 or 4 numbers), empty if unknown.
    pub span: &'a [i32],
}

/// One parsed `.proto` file and its source map.
#[derive(Debug, Clone)]
pub struct SchemaFile {
    proto: FileDescriptorProto,
    locations: HashMap<Vec<i32>, usize>,
    header: String,
}

impl SchemaFile {
    /// Wraps a parsed file descriptor.
    #[must_use]
    pub fn new(proto: FileDescriptorProto) -> Self {
        let locations = proto
            .source_code_info
            .as_ref()
            .map(|info| {
                info.location
                    .iter()
                    .enumerate()
                    // First location wins; protoc emits the full element span first.
                    .rev()
                    .map(|(i, loc)| (loc.path.clone(), i))
                    .collect()
            })
            .unwrap_or_default();

        let mut file = Self {
            proto,
            locations,
            header: String::new(),
        };
        file.header = file.compute_header();
        file
    }

    /// Returns the file path as recorded by the compiler.
    #[must_use]
    pub fn name(&self) -> &str {
        self.proto.name()
    }

    /// Returns the declared package, or an empty string.
    #[must_use]
    pub fn package(&self) -> &str {
        self.proto.package()
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn proto(&self) -> &FileDescriptorProto {
        &self.proto
    }

    /// Returns the file-level header comment.
    ///
    /// This is the detached and attached leading comments of the `syntax`
    /// statement followed by those of the `package` statement.
    #[must_use]
    pub fn header_comment(&self) -> &str {
        &self.header
    }

    /// Returns this file as an [`Element`].
    #[must_use]
    pub fn element(&self) -> Element<'_> {
        Element::File(self)
    }

    /// Top-level messages in declaration order.
    pub fn messages(&self) -> impl Iterator<Item = MessageDescriptor<'_>> {
        self.proto
            .message_type
            .iter()
            .enumerate()
            .map(move |(i, proto)| MessageDescriptor {
                file: self,
                proto,
                path: vec![FILE_MESSAGE_TYPE, index(i)],
                full_name: qualify(self.package(), proto.name()),
            })
    }

    /// Top-level enums in declaration order.
    pub fn enums(&self) -> impl Iterator<Item = EnumDescriptor<'_>> {
        self.proto
            .enum_type
            .iter()
            .enumerate()
            .map(move |(i, proto)| EnumDescriptor {
                file: self,
                proto,
                path: vec![FILE_ENUM_TYPE, index(i)],
                full_name: qualify(self.package(), proto.name()),
            })
    }

    /// Services in declaration order.
    pub fn services(&self) -> impl Iterator<Item = ServiceDescriptor<'_>> {
        self.proto
            .service
            .iter()
            .enumerate()
            .map(move |(i, proto)| ServiceDescriptor {
                file: self,
                proto,
                path: vec![FILE_SERVICE, index(i)],
                full_name: qualify(self.package(), proto.name()),
            })
    }

    /// Looks up the element at a source-code-info path.
    ///
    /// The empty path is the file itself.
    #[must_use]
    pub fn resolve(&self, path: &[i32]) -> Option<Element<'_>> {
        let mut cursor = Element::File(self);
        let mut rest = path;
        while let [tag, i, tail @ ..] = rest {
            cursor = cursor.child(*tag, usize::try_from(*i).ok()?)?;
            rest = tail;
        }
        rest.is_empty().then_some(cursor)
    }

    /// Returns the source location recorded for a path, if any.
    #[must_use]
    pub fn source_location(&self, path: &[i32]) -> Option<&ProtoLocation> {
        let info = self.proto.source_code_info.as_ref()?;
        self.locations.get(path).and_then(|&i| info.location.get(i))
    }

    fn source_info(&self, path: &[i32]) -> SourceInfo<'_> {
        let loc = self.source_location(path);
        SourceInfo {
            leading_comments: loc.map_or("", ProtoLocation::leading_comments),
            trailing_comments: loc.map_or("", ProtoLocation::trailing_comments),
            file_path: self.name(),
            file_header: &self.header,
            span: loc.map(|l| l.span.as_slice()).unwrap_or_default(),
        }
    }

    /// Span used for problems reported against the file itself.
    fn file_span(&self) -> &[i32] {
        [FILE_SYNTAX, FILE_PACKAGE]
            .iter()
            .find_map(|tag| self.source_location(&[*tag]))
            .map(|l| l.span.as_slice())
            .unwrap_or_default()
    }

    fn compute_header(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        for tag in [FILE_SYNTAX, FILE_PACKAGE] {
            if let Some(loc) = self.source_location(&[tag]) {
                parts.extend(loc.leading_detached_comments.iter().map(String::as_str));
                if let Some(leading) = loc.leading_comments.as_deref() {
                    parts.push(leading);
                }
            }
        }
        parts.join("\n")
    }
}

/// A message definition.
#[derive(Debug, Clone)]
pub struct MessageDescriptor<'a> {
    file: &'a SchemaFile,
    proto: &'a DescriptorProto,
    path: Vec<i32>,
    full_name: String,
}

impl<'a> MessageDescriptor<'a> {
    /// Returns the short name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    /// Returns the package-qualified name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn proto(&self) -> &'a DescriptorProto {
        self.proto
    }

    /// Returns true for the synthetic entry message generated for a map field.
    #[must_use]
    pub fn is_map_entry(&self) -> bool {
        self.proto
            .options
            .as_ref()
            .is_some_and(prost_types::MessageOptions::map_entry)
    }

    /// Fields in declaration order.
    pub fn fields(&self) -> impl Iterator<Item = FieldDescriptor<'a>> + '_ {
        let file = self.file;
        self.proto
            .field
            .iter()
            .enumerate()
            .map(move |(i, proto)| FieldDescriptor {
                file,
                proto,
                path: child_path(&self.path, MESSAGE_FIELD, i),
                full_name: qualify(&self.full_name, proto.name()),
            })
    }

    /// Directly nested messages, including map entries.
    pub fn nested_messages(&self) -> impl Iterator<Item = MessageDescriptor<'a>> + '_ {
        let file = self.file;
        self.proto
            .nested_type
            .iter()
            .enumerate()
            .map(move |(i, proto)| MessageDescriptor {
                file,
                proto,
                path: child_path(&self.path, MESSAGE_NESTED_TYPE, i),
                full_name: qualify(&self.full_name, proto.name()),
            })
    }

    /// Directly nested enums.
    pub fn nested_enums(&self) -> impl Iterator<Item = EnumDescriptor<'a>> + '_ {
        let file = self.file;
        self.proto
            .enum_type
            .iter()
            .enumerate()
            .map(move |(i, proto)| EnumDescriptor {
                file,
                proto,
                path: child_path(&self.path, MESSAGE_ENUM_TYPE, i),
                full_name: qualify(&self.full_name, proto.name()),
            })
    }
}

/// A message field.
#[derive(Debug, Clone)]
pub struct FieldDescriptor<'a> {
    file: &'a SchemaFile,
    proto: &'a FieldDescriptorProto,
    path: Vec<i32>,
    full_name: String,
}

impl<'a> FieldDescriptor<'a> {
    /// Returns the short name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the field number.
    #[must_use]
    pub fn number(&self) -> i32 {
        self.proto.number()
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn proto(&self) -> &'a FieldDescriptorProto {
        self.proto
    }
}

/// An enum definition.
#[derive(Debug, Clone)]
pub struct EnumDescriptor<'a> {
    file: &'a SchemaFile,
    proto: &'a EnumDescriptorProto,
    path: Vec<i32>,
    full_name: String,
}

impl<'a> EnumDescriptor<'a> {
    /// Returns the short name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn proto(&self) -> &'a EnumDescriptorProto {
        self.proto
    }

    /// Values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = EnumValueDescriptor<'a>> + '_ {
        let file = self.file;
        self.proto
            .value
            .iter()
            .enumerate()
            .map(move |(i, proto)| EnumValueDescriptor {
                file,
                proto,
                path: child_path(&self.path, ENUM_VALUE, i),
                full_name: qualify(&self.full_name, proto.name()),
            })
    }
}

/// A single enum value.
#[derive(Debug, Clone)]
pub struct EnumValueDescriptor<'a> {
    file: &'a SchemaFile,
    proto: &'a EnumValueDescriptorProto,
    path: Vec<i32>,
    full_name: String,
}

impl<'a> EnumValueDescriptor<'a> {
    /// Returns the short name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    /// Returns the name qualified by the owning enum.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the numeric value.
    #[must_use]
    pub fn number(&self) -> i32 {
        self.proto.number()
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn proto(&self) -> &'a EnumValueDescriptorProto {
        self.proto
    }
}

/// A service definition.
#[derive(Debug, Clone)]
pub struct ServiceDescriptor<'a> {
    file: &'a SchemaFile,
    proto: &'a ServiceDescriptorProto,
    path: Vec<i32>,
    full_name: String,
}

impl<'a> ServiceDescriptor<'a> {
    /// Returns the short name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    /// Returns the package-qualified name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn proto(&self) -> &'a ServiceDescriptorProto {
        self.proto
    }

    /// Methods in declaration order.
    pub fn methods(&self) -> impl Iterator<Item = MethodDescriptor<'a>> + '_ {
        let file = self.file;
        self.proto
            .method
            .iter()
            .enumerate()
            .map(move |(i, proto)| MethodDescriptor {
                file,
                proto,
                path: child_path(&self.path, SERVICE_METHOD, i),
                full_name: qualify(&self.full_name, proto.name()),
            })
    }
}

/// A service method.
#[derive(Debug, Clone)]
pub struct MethodDescriptor<'a> {
    file: &'a SchemaFile,
    proto: &'a MethodDescriptorProto,
    path: Vec<i32>,
    full_name: String,
}

impl<'a> MethodDescriptor<'a> {
    /// Returns the short name.
    #[must_use]
    pub fn name(&self) -> &'a str {
        self.proto.name()
    }

    /// Returns the fully qualified name.
    #[must_use]
    pub fn full_name(&self) -> &str {
        &self.full_name
    }

    /// Returns the request message type name.
    #[must_use]
    pub fn input_type(&self) -> &'a str {
        self.proto.input_type()
    }

    /// Returns the response message type name.
    #[must_use]
    pub fn output_type(&self) -> &'a str {
        self.proto.output_type()
    }

    /// Returns the underlying descriptor.
    #[must_use]
    pub fn proto(&self) -> &'a MethodDescriptorProto {
        self.proto
    }
}

/// Any schema element, dispatched by kind.
#[derive(Debug, Clone)]
pub enum Element<'a> {
    /// A whole file.
    File(&'a SchemaFile),
    /// A message.
    Message(MessageDescriptor<'a>),
    /// A field.
    Field(FieldDescriptor<'a>),
    /// An enum.
    Enum(EnumDescriptor<'a>),
    /// An enum value.
    EnumValue(EnumValueDescriptor<'a>),
    /// A service.
    Service(ServiceDescriptor<'a>),
    /// A method.
    Method(MethodDescriptor<'a>),
}

impl<'a> Element<'a> {
    /// Returns the concrete kind.
    #[must_use]
    pub fn kind(&self) -> ElementKind {
        match self {
            Self::File(_) => ElementKind::File,
            Self::Message(_) => ElementKind::Message,
            Self::Field(_) => ElementKind::Field,
            Self::Enum(_) => ElementKind::Enum,
            Self::EnumValue(_) => ElementKind::EnumValue,
            Self::Service(_) => ElementKind::Service,
            Self::Method(_) => ElementKind::Method,
        }
    }

    /// Returns the enclosing file.
    #[must_use]
    pub fn file(&self) -> &'a SchemaFile {
        match self {
            Self::File(f) => *f,
            Self::Message(d) => d.file,
            Self::Field(d) => d.file,
            Self::Enum(d) => d.file,
            Self::EnumValue(d) => d.file,
            Self::Service(d) => d.file,
            Self::Method(d) => d.file,
        }
    }

    /// Returns the short name; for files, the file path.
    #[must_use]
    pub fn name(&self) -> &'a str {
        match self {
            Self::File(f) => f.name(),
            Self::Message(d) => d.name(),
            Self::Field(d) => d.name(),
            Self::Enum(d) => d.name(),
            Self::EnumValue(d) => d.name(),
            Self::Service(d) => d.name(),
            Self::Method(d) => d.name(),
        }
    }

    /// Returns the stable identity: the fully qualified name, or the path for files.
    #[must_use]
    pub fn full_name(&self) -> &str {
        match self {
            Self::File(f) => f.name(),
            Self::Message(d) => &d.full_name,
            Self::Field(d) => &d.full_name,
            Self::Enum(d) => &d.full_name,
            Self::EnumValue(d) => &d.full_name,
            Self::Service(d) => &d.full_name,
            Self::Method(d) => &d.full_name,
        }
    }

    /// Returns the source-code-info path; empty for files.
    #[must_use]
    pub fn path(&self) -> &[i32] {
        match self {
            Self::File(_) => &[],
            Self::Message(d) => &d.path,
            Self::Field(d) => &d.path,
            Self::Enum(d) => &d.path,
            Self::EnumValue(d) => &d.path,
            Self::Service(d) => &d.path,
            Self::Method(d) => &d.path,
        }
    }

    /// Returns comments and span for this element.
    #[must_use]
    pub fn source_info(&self) -> SourceInfo<'a> {
        let file = self.file();
        match self {
            Self::File(f) => SourceInfo {
                leading_comments: "",
                trailing_comments: "",
                file_path: f.name(),
                file_header: f.header_comment(),
                span: f.file_span(),
            },
            _ => file.source_info(self.path()),
        }
    }

    /// Returns the location derived from this element's source span.
    #[must_use]
    pub fn location(&self) -> Location {
        let info = self.source_info();
        Location::from_span(info.file_path, info.span)
    }

    /// Returns the enclosing element; `None` for files.
    #[must_use]
    pub fn parent(&self) -> Option<Element<'a>> {
        let path = self.path();
        if path.is_empty() {
            return None;
        }
        self.file().resolve(&path[..path.len() - 2])
    }

    /// Returns the directly contained elements in declaration order.
    #[must_use]
    pub fn children(&self) -> Vec<Element<'a>> {
        match self {
            Self::File(f) => f
                .messages()
                .map(Element::Message)
                .chain(f.enums().map(Element::Enum))
                .chain(f.services().map(Element::Service))
                .collect(),
            Self::Message(m) => m
                .fields()
                .map(Element::Field)
                .chain(m.nested_messages().map(Element::Message))
                .chain(m.nested_enums().map(Element::Enum))
                .collect(),
            Self::Enum(e) => e.values().map(Element::EnumValue).collect(),
            Self::Service(s) => s.methods().map(Element::Method).collect(),
            Self::Field(_) | Self::EnumValue(_) | Self::Method(_) => Vec::new(),
        }
    }

    /// Returns the field view if this is a field.
    #[must_use]
    pub fn as_field(&self) -> Option<&FieldDescriptor<'a>> {
        match self {
            Self::Field(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the message view if this is a message.
    #[must_use]
    pub fn as_message(&self) -> Option<&MessageDescriptor<'a>> {
        match self {
            Self::Message(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the enum view if this is an enum.
    #[must_use]
    pub fn as_enum(&self) -> Option<&EnumDescriptor<'a>> {
        match self {
            Self::Enum(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the enum value view if this is an enum value.
    #[must_use]
    pub fn as_enum_value(&self) -> Option<&EnumValueDescriptor<'a>> {
        match self {
            Self::EnumValue(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the service view if this is a service.
    #[must_use]
    pub fn as_service(&self) -> Option<&ServiceDescriptor<'a>> {
        match self {
            Self::Service(d) => Some(d),
            _ => None,
        }
    }

    /// Returns the method view if this is a method.
    #[must_use]
    pub fn as_method(&self) -> Option<&MethodDescriptor<'a>> {
        match self {
            Self::Method(d) => Some(d),
            _ => None,
        }
    }

    fn child(&self, tag: i32, i: usize) -> Option<Element<'a>> {
        match (self, tag) {
            (Self::File(f), FILE_MESSAGE_TYPE) => f.messages().nth(i).map(Element::Message),
            (Self::File(f), FILE_ENUM_TYPE) => f.enums().nth(i).map(Element::Enum),
            (Self::File(f), FILE_SERVICE) => f.services().nth(i).map(Element::Service),
            (Self::Message(m), MESSAGE_FIELD) => m.fields().nth(i).map(Element::Field),
            (Self::Message(m), MESSAGE_NESTED_TYPE) => {
                m.nested_messages().nth(i).map(Element::Message)
            }
            (Self::Message(m), MESSAGE_ENUM_TYPE) => m.nested_enums().nth(i).map(Element::Enum),
            (Self::Enum(e), ENUM_VALUE) => e.values().nth(i).map(Element::EnumValue),
            (Self::Service(s), SERVICE_METHOD) => s.methods().nth(i).map(Element::Method),
            _ => None,
        }
    }
}

impl fmt::Display for Element<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} `{}`", self.kind(), self.full_name())
    }
}

fn qualify(scope: &str, name: &str) -> String {
    if scope.is_empty() {
        name.to_string()
    } else {
        format!("{scope}.{name}")
    }
}

fn child_path(parent: &[i32], tag: i32, i: usize) -> Vec<i32> {
    let mut path = Vec::with_capacity(parent.len() + 2);
    path.extend_from_slice(parent);
    path.push(tag);
    path.push(index(i));
    path
}

fn index(i: usize) -> i32 {
    i32::try_from(i).unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{enum_proto, field, file_with, map_entry, message, with_comment};

    fn sample() -> SchemaFile {
        let mut inner = message("Inner", vec![field("value", 1)]);
        inner.enum_type.push(enum_proto("Kind", &["KIND_UNSPECIFIED"]));
        let mut outer = message("Outer", vec![field("id", 1), field("labels", 2)]);
        outer.nested_type.push(inner);
        outer.nested_type.push(map_entry("LabelsEntry"));

        let mut proto = file_with("a/b.proto", "acme.v1", vec![outer]);
        with_comment(&mut proto, vec![4, 0, 2, 1], " labels comment\n");
        SchemaFile::new(proto)
    }

    #[test]
    fn qualifies_nested_names() {
        let file = sample();
        let outer = file.messages().next().unwrap();
        assert_eq!(outer.full_name(), "acme.v1.Outer");
        let inner = outer.nested_messages().next().unwrap();
        assert_eq!(inner.full_name(), "acme.v1.Outer.Inner");
        let kind = inner.nested_enums().next().unwrap();
        assert_eq!(kind.full_name(), "acme.v1.Outer.Inner.Kind");
        let value = kind.values().next().unwrap();
        assert_eq!(value.full_name(), "acme.v1.Outer.Inner.Kind.KIND_UNSPECIFIED");
    }

    #[test]
    fn resolves_paths_and_parents() {
        let file = sample();
        let element = file.resolve(&[4, 0, 3, 0, 4, 0, 2, 0]).unwrap();
        assert_eq!(element.kind(), ElementKind::EnumValue);

        let parent = element.parent().unwrap();
        assert_eq!(parent.kind(), ElementKind::Enum);
        let grandparent = parent.parent().unwrap();
        assert_eq!(grandparent.full_name(), "acme.v1.Outer.Inner");

        let top = file.resolve(&[4, 0]).unwrap();
        assert_eq!(top.parent().unwrap().kind(), ElementKind::File);
        assert!(file.element().parent().is_none());
        assert!(file.resolve(&[4, 7]).is_none());
        assert!(file.resolve(&[4]).is_none());
    }

    #[test]
    fn reads_leading_comments() {
        let file = sample();
        let labels = file.resolve(&[4, 0, 2, 1]).unwrap();
        assert_eq!(labels.source_info().leading_comments, " labels comment\n");
        assert_eq!(labels.source_info().file_path, "a/b.proto");

        let id = file.resolve(&[4, 0, 2, 0]).unwrap();
        assert_eq!(id.source_info().leading_comments, "");
    }

    #[test]
    fn detects_map_entries() {
        let file = sample();
        let outer = file.messages().next().unwrap();
        let flags: Vec<bool> = outer.nested_messages().map(|m| m.is_map_entry()).collect();
        assert_eq!(flags, vec![false, true]);
    }

    #[test]
    fn children_follow_declaration_order() {
        let file = sample();
        let outer = file.element().children().remove(0);
        let names: Vec<&str> = outer.children().iter().map(Element::name).collect();
        assert_eq!(names, vec!["id", "labels", "Inner", "LabelsEntry"]);
    }

    #[test]
    fn decodes_descriptor_sets() {
        let set = FileDescriptorSet {
            file: vec![file_with("x.proto", "", vec![message("X", vec![])])],
        };
        let files = load_descriptor_set(&set.encode_to_vec()).unwrap();
        assert_eq!(files.len(), 1);
        assert_eq!(files[0].messages().next().unwrap().full_name(), "X");

        assert!(load_descriptor_set(&[0xff, 0xff, 0xff]).is_err());
    }
}
