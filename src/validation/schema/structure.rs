//! Typed structural schemas.
//!
//! Each document version declares an [`ObjectSchema`] tree of field
//! constraints; the walker checks a raw YAML tree against it and appends
//! one violation per broken constraint, annotated with the dotted and
//! indexed path of the offending node. Unknown fields are tolerated
//! everywhere.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_yaml::Value;

use crate::validation::violation::{Violation, index_path, join_path};

pub struct ObjectSchema {
    fields: Vec<Field>,
}

pub struct Field {
    name: &'static str,
    required: bool,
    ty: FieldType,
}

impl Field {
    pub fn required(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            required: true,
            ty,
        }
    }

    pub fn optional(name: &'static str, ty: FieldType) -> Self {
        Self {
            name,
            required: false,
            ty,
        }
    }
}

pub enum FieldType {
    Str(StrRules),
    Int(IntRules),
    Bool,
    Object(ObjectSchema),
    List(Box<FieldType>),
    /// A version selector: a YAML number or string compared literally.
    Version(&'static str),
    Any,
}

#[derive(Default)]
pub struct StrRules {
    pub pattern: Option<PatternRule>,
    pub max_len: Option<usize>,
    pub one_of: Option<&'static [&'static str]>,
    pub literal: Option<&'static str>,
    pub check: Option<fn(&str) -> Result<(), String>>,
}

pub struct PatternRule {
    pub re: &'static Lazy<Regex>,
    /// Continues the sentence "`<path>` ...", e.g. "must be a lowercase name".
    pub expects: &'static str,
}

#[derive(Default)]
pub struct IntRules {
    pub gt: Option<i64>,
    pub lt: Option<i64>,
}

// Declaration helpers, so version modules read as schema tables.

pub fn text() -> FieldType {
    FieldType::Str(StrRules::default())
}

pub fn pattern(re: &'static Lazy<Regex>, expects: &'static str) -> FieldType {
    FieldType::Str(StrRules {
        pattern: Some(PatternRule { re, expects }),
        ..StrRules::default()
    })
}

pub fn one_of(values: &'static [&'static str]) -> FieldType {
    FieldType::Str(StrRules {
        one_of: Some(values),
        ..StrRules::default()
    })
}

pub fn literal(value: &'static str) -> FieldType {
    FieldType::Str(StrRules {
        literal: Some(value),
        ..StrRules::default()
    })
}

pub fn checked(check: fn(&str) -> Result<(), String>) -> FieldType {
    FieldType::Str(StrRules {
        check: Some(check),
        ..StrRules::default()
    })
}

pub fn int_between_exclusive(gt: i64, lt: i64) -> FieldType {
    FieldType::Int(IntRules {
        gt: Some(gt),
        lt: Some(lt),
    })
}

pub fn boolean() -> FieldType {
    FieldType::Bool
}

pub fn object(fields: Vec<Field>) -> FieldType {
    FieldType::Object(ObjectSchema::new(fields))
}

pub fn list(item: FieldType) -> FieldType {
    FieldType::List(Box::new(item))
}

pub fn version(lit: &'static str) -> FieldType {
    FieldType::Version(lit)
}

pub fn any() -> FieldType {
    FieldType::Any
}

impl ObjectSchema {
    pub fn new(fields: Vec<Field>) -> Self {
        Self { fields }
    }

    /// Check `value` against this declaration, appending violations for
    /// every broken constraint. A field that is present but null counts
    /// as absent.
    pub fn walk(&self, value: &Value, path: &str, out: &mut Vec<Violation>) {
        if value.as_mapping().is_none() {
            out.push(if path.is_empty() {
                Violation::document("document must be a YAML mapping")
            } else {
                Violation::field(path, "must be a mapping")
            });
            return;
        }
        for field in &self.fields {
            let field_path = join_path(path, field.name);
            match value.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        out.push(Violation::field(field_path, "is required"));
                    }
                }
                Some(v) => field.ty.check(v, &field_path, out),
            }
        }
    }
}

impl FieldType {
    fn check(&self, value: &Value, path: &str, out: &mut Vec<Violation>) {
        match self {
            FieldType::Any => {}
            FieldType::Bool => {
                if !value.is_bool() {
                    out.push(Violation::field(path, "must be a boolean"));
                }
            }
            FieldType::Int(rules) => match value.as_i64() {
                None => out.push(Violation::field(path, "must be an integer")),
                Some(n) => {
                    let below = rules.gt.is_some_and(|gt| n <= gt);
                    let above = rules.lt.is_some_and(|lt| n >= lt);
                    if below || above {
                        let detail = match (rules.gt, rules.lt) {
                            (Some(gt), Some(lt)) => {
                                format!("must be strictly between {gt} and {lt}")
                            }
                            (Some(gt), None) => format!("must be greater than {gt}"),
                            (None, Some(lt)) => format!("must be less than {lt}"),
                            (None, None) => unreachable!(),
                        };
                        out.push(Violation::field(path, detail));
                    }
                }
            },
            FieldType::Str(rules) => match value.as_str() {
                None => out.push(Violation::field(path, "must be a string")),
                Some(s) => rules.check_str(s, path, out),
            },
            FieldType::Object(schema) => schema.walk(value, path, out),
            FieldType::List(item) => match value.as_sequence() {
                None => out.push(Violation::field(path, "must be a list")),
                Some(seq) => {
                    for (i, element) in seq.iter().enumerate() {
                        item.check(element, &index_path(path, i), out);
                    }
                }
            },
            FieldType::Version(lit) => {
                let matches = match value {
                    Value::String(s) => s == lit,
                    Value::Number(n) => n.to_string() == *lit,
                    _ => false,
                };
                if !matches {
                    out.push(Violation::field(path, format!("must be {lit}")));
                }
            }
        }
    }
}

impl StrRules {
    fn check_str(&self, s: &str, path: &str, out: &mut Vec<Violation>) {
        if let Some(lit) = self.literal
            && s != lit
        {
            out.push(Violation::field(path, format!("must be '{lit}'")));
        }
        if let Some(values) = self.one_of
            && !values.contains(&s)
        {
            out.push(Violation::field(
                path,
                format!("must be one of {}", values.join(", ")),
            ));
        }
        if let Some(p) = &self.pattern
            && !p.re.is_match(s)
        {
            out.push(Violation::field(path, p.expects));
        }
        if let Some(max) = self.max_len
            && s.chars().count() > max
        {
            out.push(Violation::field(
                path,
                format!("must be at most {max} characters long"),
            ));
        }
        if let Some(check) = self.check
            && let Err(detail) = check(s)
        {
            out.push(Violation::field(path, detail));
        }
    }
}
