//! field casing policy
//!
//! Applied at the text boundary to slot names, dynamic field names and the names of default variables.
use heck::{ToKebabCase, ToSnakeCase};
use std::borrow::Cow;

#[derive(Debug, Clone, Copy, Default)]
pub enum Casing {
    /// Names are written as they are
    #[default]
    Preserve,
    /// `StringProp` -> `stringProp`, `URLValue` -> `urlValue`
    CamelCase,
    /// `StringProp` -> `string_prop`
    SnakeCase,
    /// `StringProp` -> `string-prop`
    KebabCase,
    Custom(fn(&str) -> String),
}

impl Casing {
    pub fn convert<'a>(&self, name: &'a str) -> Cow<'a, str> {
        match self {
            Casing::Preserve => Cow::Borrowed(name),
            Casing::CamelCase => camel_case(name),
            Casing::SnakeCase => Cow::Owned(name.to_snake_case()),
            Casing::KebabCase => Cow::Owned(name.to_kebab_case()),
            Casing::Custom(convert) => Cow::Owned(convert(name)),
        }
    }
}

/// Lowercase the leading run of uppercase characters
///
/// The last uppercase character of a run stays uppercase when it starts the next word. Matches the common json
/// camel-case naming policy: underscores and digits are left alone, so `items_0` stays `items_0`.
fn camel_case(name: &str) -> Cow<'_, str> {
    if !name.starts_with(char::is_uppercase) {
        return Cow::Borrowed(name);
    }

    let mut chars: Vec<char> = name.chars().collect();
    for i in 0..chars.len() {
        if i == 1 && !chars[i].is_uppercase() {
            break;
        }

        if let Some(next) = chars.get(i + 1).copied() {
            if i > 0 && !next.is_uppercase() {
                if next == ' ' {
                    chars[i] = lowercase(chars[i]);
                }
                break;
            }
        }

        chars[i] = lowercase(chars[i]);
    }

    Cow::Owned(chars.into_iter().collect())
}

fn lowercase(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn preserve() {
        assert_eq!(Casing::Preserve.convert("StringProp"), "StringProp");
    }

    #[test]
    fn camel() {
        let camel = |name| Casing::CamelCase.convert(name).into_owned();
        assert_eq!(camel("count"), "count");
        assert_eq!(camel("Count"), "count");
        assert_eq!(camel("StringProp"), "stringProp");
        assert_eq!(camel("URLValue"), "urlValue");
        assert_eq!(camel("ID"), "id");
        assert_eq!(camel("items_0"), "items_0");
        assert_eq!(camel("A"), "a");
        assert_eq!(camel(""), "");
    }

    #[test]
    fn snake_and_kebab() {
        assert_eq!(Casing::SnakeCase.convert("StringProp"), "string_prop");
        assert_eq!(Casing::SnakeCase.convert("URLValue"), "url_value");
        assert_eq!(Casing::SnakeCase.convert("already_snake"), "already_snake");
        assert_eq!(Casing::KebabCase.convert("NullableDecimalProp"), "nullable-decimal-prop");
        assert_eq!(Casing::KebabCase.convert("item2Name"), "item2-name");
        assert_eq!(Casing::KebabCase.convert("Headers_0"), "headers-0");
        assert_eq!(Casing::SnakeCase.convert("Headers_0"), "headers_0");
    }

    #[test]
    fn custom() {
        let casing = Casing::Custom(|name| name.to_uppercase());
        assert_eq!(casing.convert("abc"), "ABC");
    }
}
