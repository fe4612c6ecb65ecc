use miette::Result;


/// A deserialized, not yet validated ("unresolved") configuration section.
///
/// Resolving needs some outside knowledge, usually the directory the configuration
/// file lives in (relative paths are interpreted against it).
pub trait ResolvableConfigurationWithContext {
    type Context: ?Sized;
    type Resolved;

    /// Validate this section and turn it into its `Resolved` type.
    /// Return `Err` if the section is invalid.
    fn resolve(self, context: &Self::Context) -> Result<Self::Resolved>;
}
