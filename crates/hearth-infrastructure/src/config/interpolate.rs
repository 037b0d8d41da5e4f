//! Variable interpolation
//!
//! Configuration documents may reference `${NAME}` or `${NAME:default}`.
//! Names resolve against process-level properties first, then the process
//! environment, then the inline default. Replacement text is never scanned
//! again, so values containing `${` are inserted verbatim.

use std::collections::HashMap;

use hearth_domain::error::{Error, Result};

const OPEN: &str = "${";
const CLOSE: char = '}';

/// Looks up variable values
#[derive(Debug, Clone)]
pub struct VariableResolver {
    properties: HashMap<String, String>,
    use_environment: bool,
}

impl Default for VariableResolver {
    fn default() -> Self {
        Self {
            properties: HashMap::new(),
            use_environment: true,
        }
    }
}

impl VariableResolver {
    /// Resolver over the process environment with no properties
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a process-level property
    #[must_use]
    pub fn with_property(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.properties.insert(name.into(), value.into());
        self
    }

    /// Add several process-level properties
    #[must_use]
    pub fn with_properties<I, K, V>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.properties
            .extend(properties.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Enable or disable environment lookups
    #[must_use]
    pub fn with_environment(mut self, enabled: bool) -> Self {
        self.use_environment = enabled;
        self
    }

    /// Process-level properties
    pub fn properties(&self) -> &HashMap<String, String> {
        &self.properties
    }

    /// Value of a variable from properties or environment
    pub fn resolve(&self, name: &str) -> Option<String> {
        if let Some(value) = self.properties.get(name) {
            return Some(value.clone());
        }
        if self.use_environment {
            return std::env::var(name).ok();
        }
        None
    }

    fn resolve_expression(&self, expression: &str) -> Option<String> {
        match expression.split_once(':') {
            Some((name, default)) => self
                .resolve(name)
                .or_else(|| Some(default.trim().to_string())),
            None => self.resolve(expression),
        }
    }
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}

/// Replace every variable reference in `text`
///
/// # Errors
///
/// - [`Error::Interpolation`] for an unterminated reference or one spanning lines
/// - [`Error::MissingVariable`] when a reference without default cannot be resolved
pub fn interpolate(text: &str, resolver: &VariableResolver) -> Result<String> {
    let mut output = String::with_capacity(text.len());
    let mut rest = text;
    let mut consumed = 0;

    while let Some(start) = rest.find(OPEN) {
        let body_start = start + OPEN.len();
        let Some(length) = rest[body_start..].find(CLOSE) else {
            return Err(Error::interpolation(
                "Could not find a closing curly bracket '}' for variable",
                line_of(text, consumed + start),
            ));
        };
        let expression = &rest[body_start..body_start + length];
        if expression.contains('\n') {
            return Err(Error::interpolation(
                "Multi-line variable, possibly missing curly bracket '}'",
                line_of(text, consumed + start),
            ));
        }

        let value = resolver
            .resolve_expression(expression)
            .ok_or_else(|| Error::missing_variable(expression))?;

        output.push_str(&rest[..start]);
        output.push_str(&value);

        let next = body_start + length + CLOSE.len_utf8();
        consumed += next;
        rest = &rest[next..];
    }

    output.push_str(rest);
    Ok(output)
}
