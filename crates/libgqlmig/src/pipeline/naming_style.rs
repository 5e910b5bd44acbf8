/// Normalization applied to static operation names in report output.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub enum NamingStyle {
    CamelCase,
    PascalCase,
    #[default]
    Preserve,
}
impl NamingStyle {
    pub fn normalize(&self, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::PascalCase => {
                let camel = to_camel(name);
                capitalize_first(&camel)
            },
            Self::CamelCase => {
                let camel = to_camel(name);
                lowercase_first(&camel)
            },
        }
    }
}
impl std::fmt::Display for NamingStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::CamelCase => "camelCase",
            Self::PascalCase => "pascalCase",
            Self::Preserve => "preserve",
        })
    }
}
impl std::str::FromStr for NamingStyle {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "camelCase" => Ok(Self::CamelCase),
            "pascalCase" => Ok(Self::PascalCase),
            "preserve" => Ok(Self::Preserve),
            other => Err(format!(
                "unknown naming style `{other}` \
                (expected pascalCase|camelCase|preserve)"
            )),
        }
    }
}

/// Joins `_`/`-` separated segments, capitalizing each boundary.
fn to_camel(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    let mut capitalize_next = false;
    for ch in name.chars() {
        if ch == '_' || ch == '-' {
            capitalize_next = true;
            continue;
        }
        if capitalize_next {
            out.extend(ch.to_uppercase());
            capitalize_next = false;
        } else {
            out.push(ch);
        }
    }
    out
}

fn capitalize_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn lowercase_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
