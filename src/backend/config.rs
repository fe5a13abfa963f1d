//! Generator configuration
//!
//! Knobs that change the emitted program without changing its shape. Defaults reproduce the
//! conventional output (`app.db`, port 8080, ten form pairs, 64 KiB page buffer).

/// Settings for one C generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    /// SQLite database file opened by the generated `main`.
    pub db_path: String,
    /// TCP port the generated HTTP server listens on.
    pub port: u16,
    /// Maximum number of `name=value` pairs parsed from a form body.
    pub form_pair_limit: usize,
    /// Initial capacity of the array returned by `X_all`; it doubles as rows arrive.
    pub list_capacity: usize,
    /// Size in bytes of the buffer a page renderer writes into.
    pub page_buffer_size: usize,
    /// Spaces per indentation level in the emitted C.
    pub indent_width: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            db_path: "app.db".to_string(),
            port: 8080,
            form_pair_limit: 10,
            list_capacity: 10,
            page_buffer_size: 65536,
            indent_width: 4,
        }
    }
}

impl GeneratorConfig {
    pub fn with_db_path(mut self, path: impl Into<String>) -> Self {
        self.db_path = path.into();
        self
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn with_form_pair_limit(mut self, limit: usize) -> Self {
        self.form_pair_limit = limit.max(1);
        self
    }

    pub fn with_list_capacity(mut self, capacity: usize) -> Self {
        self.list_capacity = capacity.max(1);
        self
    }

    pub fn with_page_buffer_size(mut self, size: usize) -> Self {
        self.page_buffer_size = size;
        self
    }

    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }
}
