//! # Parameter Schemas
//!
//! Typed descriptions of tool parameters. Tools declare their parameters
//! once at registration time; the manifest generator turns them into the
//! coarse `int | float | boolean | string` tags the planner understands.

use serde::Serialize;

/// Coarse type tag exposed to the planner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ParamType {
    #[serde(rename = "int")]
    Int,
    #[serde(rename = "float")]
    Float,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "string")]
    String,
}

impl ParamType {
    /// The tag as it appears in the manifest.
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamType::Int => "int",
            ParamType::Float => "float",
            ParamType::Boolean => "boolean",
            ParamType::String => "string",
        }
    }

    /// Infer a tag from a declared type name.
    ///
    /// Precedence is integer-like, then float-like, then boolean-like;
    /// anything else, including a missing or unparseable declaration,
    /// falls back to [`ParamType::String`]. `Option<T>` is looked through.
    pub fn infer(declared: Option<&str>) -> Self {
        let Some(declared) = declared else {
            return ParamType::String;
        };

        let normalized: String = declared
            .chars()
            .filter(|c| !c.is_whitespace())
            .collect::<String>()
            .to_ascii_lowercase();
        let inner = strip_wrapper(&normalized);

        match inner {
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" | "int" | "integer" | "long" => ParamType::Int,
            "f32" | "f64" | "float" | "double" | "number" => ParamType::Float,
            "bool" | "boolean" => ParamType::Boolean,
            _ => ParamType::String,
        }
    }
}

impl std::fmt::Display for ParamType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn strip_wrapper(declared: &str) -> &str {
    let mut current = declared;
    for prefix in ["option<", "optional["] {
        if let Some(rest) = current.strip_prefix(prefix) {
            current = rest
                .strip_suffix('>')
                .or_else(|| rest.strip_suffix(']'))
                .unwrap_or(rest);
        }
    }
    current
}

/// Rust types that map onto a manifest type tag.
pub trait SchemaType {
    const PARAM_TYPE: ParamType;
}

macro_rules! schema_type {
    ($tag:expr => $($ty:ty),+ $(,)?) => {
        $(impl SchemaType for $ty {
            const PARAM_TYPE: ParamType = $tag;
        })+
    };
}

schema_type!(ParamType::Int => i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
schema_type!(ParamType::Float => f32, f64);
schema_type!(ParamType::Boolean => bool);
schema_type!(ParamType::String => String, &str, char);

impl<T: SchemaType> SchemaType for Option<T> {
    const PARAM_TYPE: ParamType = T::PARAM_TYPE;
}

/// A single declared tool parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub param_type: ParamType,
    pub required: bool,
}

impl ParamSpec {
    /// Declare a parameter with its Rust type.
    pub fn typed<T: SchemaType>(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            param_type: T::PARAM_TYPE,
            required: true,
        }
    }

    /// Declare a parameter from a type name, as found in an external
    /// definition. Unknown names degrade to `string`.
    pub fn declared(name: impl Into<String>, declared_type: Option<&str>) -> Self {
        Self {
            name: name.into(),
            param_type: ParamType::infer(declared_type),
            required: true,
        }
    }

    /// Mark the parameter as optional.
    pub fn optional(mut self) -> Self {
        self.required = false;
        self
    }

    /// Human readable title for this parameter.
    pub fn title(&self) -> String {
        derive_title(&self.name)
    }
}

/// Derive a display title from a parameter name.
///
/// Underscores become spaces and every run of letters is title-cased:
/// `project_description` becomes `Project Description`. A letter is
/// upper-cased when it does not follow another letter, so digits and
/// stray separators never cause a failure.
pub fn derive_title(name: &str) -> String {
    let mut title = String::with_capacity(name.len());
    let mut prev_alpha = false;

    for ch in name.chars() {
        let ch = if ch == '_' { ' ' } else { ch };
        if ch.is_alphabetic() {
            if prev_alpha {
                title.extend(ch.to_lowercase());
            } else {
                title.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            title.push(ch);
            prev_alpha = false;
        }
    }

    title
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(Some("i32"), ParamType::Int)]
    #[case(Some("usize"), ParamType::Int)]
    #[case(Some("int"), ParamType::Int)]
    #[case(Some("Option<u8>"), ParamType::Int)]
    #[case(Some("Optional[int]"), ParamType::Int)]
    #[case(Some("f64"), ParamType::Float)]
    #[case(Some("float"), ParamType::Float)]
    #[case(Some("bool"), ParamType::Boolean)]
    #[case(Some("Option < bool >"), ParamType::Boolean)]
    #[case(Some("String"), ParamType::String)]
    #[case(Some("Vec<String>"), ParamType::String)]
    #[case(Some(""), ParamType::String)]
    #[case(None, ParamType::String)]
    fn infers_coarse_type_tags(#[case] declared: Option<&str>, #[case] expected: ParamType) {
        assert_eq!(ParamType::infer(declared), expected);
    }

    #[test]
    fn typed_params_use_schema_type() {
        assert_eq!(ParamSpec::typed::<i64>("n").param_type, ParamType::Int);
        assert_eq!(ParamSpec::typed::<f32>("x").param_type, ParamType::Float);
        assert_eq!(ParamSpec::typed::<bool>("b").param_type, ParamType::Boolean);
        assert_eq!(ParamSpec::typed::<String>("s").param_type, ParamType::String);
        let sdg = ParamSpec::typed::<Option<u8>>("sdg_number").optional();
        assert_eq!(sdg.param_type, ParamType::Int);
        assert!(!sdg.required);
    }

    #[test]
    fn declared_params_infer_from_type_names() {
        let count = ParamSpec::declared("count", Some("Option<i32>")).optional();
        assert_eq!(count.param_type, ParamType::Int);
        assert!(!count.required);
        assert_eq!(count.title(), "Count");

        let untyped = ParamSpec::declared("note", None);
        assert_eq!(untyped.param_type, ParamType::String);
        assert!(untyped.required);
        assert_eq!(untyped, ParamSpec::typed::<String>("note"));
    }

    #[rstest]
    #[case("project_description", "Project Description")]
    #[case("sdg_number", "Sdg Number")]
    #[case("initiative_description", "Initiative Description")]
    #[case("x", "X")]
    #[case("_private", " Private")]
    #[case("double__under", "Double  Under")]
    #[case("v2_target", "V2 Target")]
    #[case("", "")]
    fn derives_titles(#[case] name: &str, #[case] expected: &str) {
        assert_eq!(derive_title(name), expected);
    }

    #[test]
    fn tags_serialize_as_manifest_strings() {
        assert_eq!(
            serde_json::to_string(&ParamType::Boolean).unwrap(),
            "\"boolean\""
        );
        assert_eq!(ParamType::Int.to_string(), "int");
    }
}
