/// Trait for loading service configuration from environment variables.
///
/// Implementors derive `serde::Deserialize` (use `#[serde(default = ...)]` for optional
/// settings) and call `Config::from_env()` once at startup.
pub trait Config: Sized + serde::de::DeserializeOwned {
    fn from_env() -> Result<Self, envy::Error> {
        envy::from_env()
    }

    /// Load from an explicit set of key/value pairs. Keys are matched case-insensitively
    /// against field names, the same way environment variables are.
    fn from_pairs<I>(pairs: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(pairs)
    }
}
