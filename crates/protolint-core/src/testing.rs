//! Builders for hand-written descriptors.
//!
//! Rule catalogs use these in their tests instead of running a schema
//! compiler.

use prost_types::source_code_info::Location as ProtoLocation;
use prost_types::{
    DescriptorProto, EnumDescriptorProto, EnumValueDescriptorProto, FieldDescriptorProto,
    FileDescriptorProto, MessageOptions, MethodDescriptorProto, ServiceDescriptorProto,
    SourceCodeInfo,
};

/// A file with the given path, package and top-level messages.
#[must_use]
pub fn file_with(name: &str, package: &str, messages: Vec<DescriptorProto>) -> FileDescriptorProto {
    FileDescriptorProto {
        name: Some(name.to_string()),
        package: (!package.is_empty()).then(|| package.to_string()),
        syntax: Some("proto3".to_string()),
        message_type: messages,
        ..FileDescriptorProto::default()
    }
}

/// A message with the given fields.
#[must_use]
pub fn message(name: &str, fields: Vec<FieldDescriptorProto>) -> DescriptorProto {
    DescriptorProto {
        name: Some(name.to_string()),
        field: fields,
        ..DescriptorProto::default()
    }
}

/// A synthetic map-entry message with `key` and `value` fields.
#[must_use]
pub fn map_entry(name: &str) -> DescriptorProto {
    DescriptorProto {
        options: Some(MessageOptions {
            map_entry: Some(true),
            ..MessageOptions::default()
        }),
        ..message(name, vec![field("key", 1), field("value", 2)])
    }
}

/// A field with the given name and number.
#[must_use]
pub fn field(name: &str, number: i32) -> FieldDescriptorProto {
    FieldDescriptorProto {
        name: Some(name.to_string()),
        number: Some(number),
        ..FieldDescriptorProto::default()
    }
}

/// An enum whose values are numbered from zero.
#[must_use]
pub fn enum_proto(name: &str, values: &[&str]) -> EnumDescriptorProto {
    EnumDescriptorProto {
        name: Some(name.to_string()),
        value: values
            .iter()
            .zip(0..)
            .map(|(v, number)| EnumValueDescriptorProto {
                name: Some((*v).to_string()),
                number: Some(number),
                ..EnumValueDescriptorProto::default()
            })
            .collect(),
        ..EnumDescriptorProto::default()
    }
}

/// A service with unary methods named as given.
#[must_use]
pub fn service(name: &str, methods: &[&str]) -> ServiceDescriptorProto {
    ServiceDescriptorProto {
        name: Some(name.to_string()),
        method: methods
            .iter()
            .map(|m| MethodDescriptorProto {
                name: Some((*m).to_string()),
                input_type: Some(format!(".{m}Request")),
                output_type: Some(format!(".{m}Response")),
                ..MethodDescriptorProto::default()
            })
            .collect(),
        ..ServiceDescriptorProto::default()
    }
}

/// Attaches a leading comment to the element at `path`.
pub fn with_comment(file: &mut FileDescriptorProto, path: Vec<i32>, comment: &str) {
    push_location(
        file,
        ProtoLocation {
            path,
            leading_comments: Some(comment.to_string()),
            ..ProtoLocation::default()
        },
    );
}

/// Records a source span for the element at `path`.
pub fn with_span(file: &mut FileDescriptorProto, path: Vec<i32>, span: Vec<i32>) {
    push_location(
        file,
        ProtoLocation {
            path,
            span,
            ..ProtoLocation::default()
        },
    );
}

/// Attaches a header comment to the file's `syntax` statement.
pub fn with_header(file: &mut FileDescriptorProto, comment: &str) {
    push_location(
        file,
        ProtoLocation {
            path: vec![12],
            span: vec![0, 0, 18],
            leading_detached_comments: vec![comment.to_string()],
            ..ProtoLocation::default()
        },
    );
}

fn push_location(file: &mut FileDescriptorProto, location: ProtoLocation) {
    let info = file.source_code_info.get_or_insert_with(SourceCodeInfo::default);
    if let Some(existing) = info.location.iter_mut().find(|l| l.path == location.path) {
        if location.leading_comments.is_some() {
            existing.leading_comments = location.leading_comments;
        }
        if !location.span.is_empty() {
            existing.span = location.span;
        }
        existing
            .leading_detached_comments
            .extend(location.leading_detached_comments);
    } else {
        info.location.push(location);
    }
}
