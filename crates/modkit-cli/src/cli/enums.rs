use clap::ValueEnum;

/// Target platform environment
#[derive(Copy, Clone, PartialEq, Eq, Debug, ValueEnum)]
pub enum Platform {
    /// Browser environment
    ///
    /// Adds the "browser" export condition and honors the package.json
    /// `browser` field.
    #[value(name = "browser")]
    Browser,

    /// Node.js environment
    ///
    /// Adds the "node" export condition.
    #[value(name = "node")]
    Node,

    /// No platform condition
    #[value(name = "neutral")]
    Neutral,
}

impl From<Platform> for modkit_config::Platform {
    fn from(platform: Platform) -> Self {
        match platform {
            Platform::Browser => modkit_config::Platform::Browser,
            Platform::Node => modkit_config::Platform::Node,
            Platform::Neutral => modkit_config::Platform::Neutral,
        }
    }
}
