/// How GraphQL-bearing expressions are located within a source file.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, serde::Deserialize, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStrategy {
    /// Parse the host-language syntax tree and capture exact byte ranges
    /// plus interpolation structure. Rejects files the parser rejects.
    Ast,

    /// Run `Ast`, falling back to `Pluck` for files the host parser
    /// rejects.
    #[default]
    Hybrid,

    /// Scan file text for tagged template literals without host-language
    /// parsing. Fast and tolerant of non-parseable files.
    Pluck,
}
impl std::fmt::Display for ExtractionStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Ast => "ast",
            Self::Hybrid => "hybrid",
            Self::Pluck => "pluck",
        })
    }
}
impl std::str::FromStr for ExtractionStrategy {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "ast" => Ok(Self::Ast),
            "hybrid" => Ok(Self::Hybrid),
            "pluck" => Ok(Self::Pluck),
            other => Err(format!(
                "unknown extraction strategy `{other}` \
                (expected pluck|ast|hybrid)"
            )),
        }
    }
}
