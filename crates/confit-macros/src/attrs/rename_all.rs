use convert_case::Case;
use darling::FromMeta;

/// Container-wide key style, named the way serde names them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenameAll {
    Lower,
    Upper,
    Pascal,
    Camel,
    Snake,
    ScreamingSnake,
    Kebab,
}

impl RenameAll {
    pub fn to_case(self) -> Case<'static> {
        match self {
            RenameAll::Lower => Case::Flat,
            RenameAll::Upper => Case::UpperFlat,
            RenameAll::Pascal => Case::Pascal,
            RenameAll::Camel => Case::Camel,
            RenameAll::Snake => Case::Snake,
            RenameAll::ScreamingSnake => Case::UpperSnake,
            RenameAll::Kebab => Case::Kebab,
        }
    }
}

impl FromMeta for RenameAll {
    fn from_string(value: &str) -> darling::Result<Self> {
        match value {
            "lowercase" => Ok(RenameAll::Lower),
            "UPPERCASE" => Ok(RenameAll::Upper),
            "PascalCase" => Ok(RenameAll::Pascal),
            "camelCase" => Ok(RenameAll::Camel),
            "snake_case" => Ok(RenameAll::Snake),
            "SCREAMING_SNAKE_CASE" => Ok(RenameAll::ScreamingSnake),
            "kebab-case" => Ok(RenameAll::Kebab),
            _ => Err(darling::Error::unknown_value(value)),
        }
    }
}
