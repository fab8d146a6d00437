//! Generator configuration.

/// Header line written at the top of every generated unit.
pub const DEFAULT_HEADER: &str = "// automatically generated by flatgen, do not modify";

/// Options controlling the shape of generated code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorOptions {
    runtime_crate: String,
    namespace_root: String,
    layout_assertions: bool,
    header: String,
}

impl GeneratorOptions {
    /// Creates options with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            runtime_crate: "flatgen_runtime".to_string(),
            namespace_root: "crate".to_string(),
            layout_assertions: true,
            header: DEFAULT_HEADER.to_string(),
        }
    }

    /// Sets the path of the runtime crate imported as `fb`.
    #[must_use]
    pub fn runtime_crate(mut self, path: impl Into<String>) -> Self {
        self.runtime_crate = path.into();
        self
    }

    /// Sets the module path that namespace modules hang from.
    #[must_use]
    pub fn namespace_root(mut self, root: impl Into<String>) -> Self {
        self.namespace_root = root.into();
        self
    }

    /// Enables or disables the compile-time struct size assertions.
    #[must_use]
    pub fn layout_assertions(mut self, enabled: bool) -> Self {
        self.layout_assertions = enabled;
        self
    }

    /// Sets the header comment line.
    #[must_use]
    pub fn header(mut self, header: impl Into<String>) -> Self {
        self.header = header.into();
        self
    }

    /// Returns the runtime crate path.
    #[must_use]
    pub fn runtime_crate_path(&self) -> &str {
        &self.runtime_crate
    }

    /// Returns the namespace root path.
    #[must_use]
    pub fn namespace_root_path(&self) -> &str {
        &self.namespace_root
    }

    /// Returns true if struct size assertions are emitted.
    #[must_use]
    pub fn emits_layout_assertions(&self) -> bool {
        self.layout_assertions
    }

    /// Returns the header comment line.
    #[must_use]
    pub fn header_line(&self) -> &str {
        &self.header
    }
}

impl Default for GeneratorOptions {
    fn default() -> Self {
        Self::new()
    }
}
