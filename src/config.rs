//! Control selectors for the target page.

/// CSS selectors for the controls the helper drives.
#[derive(Debug, Clone, Copy)]
pub struct Selectors {
    /// Numeric input inside the temperature slider container.
    pub temperature_input: &'static str,
    /// Toggle switch enabling the web-search tool.
    pub web_search_switch: &'static str,
    /// Toggle switch enabling the URL-context tool.
    pub url_context_switch: &'static str,
}

/// Selector table for the supported page.
pub const SELECTORS: Selectors = Selectors {
    temperature_input: r#"[data-test-id="temperatureSliderContainer"] input[type="number"]"#,
    web_search_switch: r#"[data-test-id="searchAsAToolTooltip"] button[role="switch"]"#,
    url_context_switch: r#"[data-test-id="browseAsAToolTooltip"] button[role="switch"]"#,
};
