//! Inline error values and their textual rendering.
//!
//! A failing call does not abort resolution. Its evaluator returns a
//! [`Diagnostic`], the resolver renders it with a [`Formatter`] and splices
//! the text into the document exactly like a successful result:
//!
//! ```text
//! {{#ifexist: #}}   ->   **ERROR: ifexist: test parameter cannot be empty!**
//! ```
//!
//! With `wrap_errors` enabled the text is additionally wrapped in a
//! `<wrap SEVERITY>` tag so the host can style it.
use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

// ---------------------------------------------------------------------------
// Error value
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Notice,
    Alert,
    Important,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Notice => "notice",
            Self::Alert => "alert",
            Self::Important => "important",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageKey {
    NoSuchFunction,
    NotEnoughParams,
    EmptyTestParameter,
    InvalidSyntax,
    InvalidExpression,
    UndefinedResult,
    EvaluationError,
}

impl MessageKey {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NoSuchFunction => "no_such_function",
            Self::NotEnoughParams => "not_enough_params",
            Self::EmptyTestParameter => "empty_test_parameter",
            Self::InvalidSyntax => "invalid_syntax",
            Self::InvalidExpression => "invalid_expression",
            Self::UndefinedResult => "undefined_result",
            Self::EvaluationError => "evaluation_error",
        }
    }
}

impl fmt::Display for MessageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A validation or evaluation failure of a single call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub function: String,
    pub key: MessageKey,
}

impl Diagnostic {
    pub fn new(severity: Severity, function: impl Into<String>, key: MessageKey) -> Self {
        Self {
            severity,
            function: function.into(),
            key,
        }
    }

    /// Argument-level failure: bad or missing parameters, failed evaluation.
    pub fn alert(function: impl Into<String>, key: MessageKey) -> Self {
        Self::new(Severity::Alert, function, key)
    }

    /// Call-level failure: the call itself cannot be interpreted.
    pub fn important(function: impl Into<String>, key: MessageKey) -> Self {
        Self::new(Severity::Important, function, key)
    }
}

// ---------------------------------------------------------------------------
// Message catalogs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
pub enum Lang {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "pt-br")]
    PtBr,
}

impl Lang {
    fn error_label(self) -> &'static str {
        match self {
            Self::En => "ERROR:",
            Self::PtBr => "ERRO:",
        }
    }

    pub fn message(self, key: MessageKey) -> &'static str {
        use MessageKey::*;
        match (self, key) {
            (Self::En, NoSuchFunction) => "there is no such function!",
            (Self::En, NotEnoughParams) => "not enough parameters were provided!",
            (Self::En, EmptyTestParameter) => "test parameter cannot be empty!",
            (Self::En, InvalidSyntax) => "invalid syntax!",
            (Self::En, InvalidExpression) => "expression contains invalid characters.",
            (Self::En, UndefinedResult) => "indefinite or not numerical result.",
            (Self::En, EvaluationError) => "error evaluating the expression.",

            (Self::PtBr, NoSuchFunction) => "a função não existe!",
            (Self::PtBr, NotEnoughParams) => "não foram fornecidos parâmetros suficientes!",
            (Self::PtBr, EmptyTestParameter) => "o parâmetro de teste não pode estar vazio!",
            (Self::PtBr, InvalidSyntax) => "sintaxe inválida!",
            (Self::PtBr, InvalidExpression) => "expressão contém caracteres inválidos.",
            (Self::PtBr, UndefinedResult) => "resultado indefinido ou não numérico.",
            (Self::PtBr, EvaluationError) => "erro ao avaliar a expressão.",
        }
    }
}

impl FromStr for Lang {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "en" => Ok(Self::En),
            "pt-br" | "pt_br" => Ok(Self::PtBr),
            other => Err(format!("unsupported language '{}' (expected en or pt-br)", other)),
        }
    }
}

// ---------------------------------------------------------------------------
// Formatter
// ---------------------------------------------------------------------------

/// Renders a [`Diagnostic`] into the markup substituted into the document.
#[derive(Debug, Clone, Copy, Default)]
pub struct Formatter {
    pub lang: Lang,
    pub wrap: bool,
}

impl Formatter {
    pub fn new(lang: Lang, wrap: bool) -> Self {
        Self { lang, wrap }
    }

    pub fn render(&self, diagnostic: &Diagnostic) -> String {
        let text = format!(
            "**{} {}: {}**",
            self.lang.error_label(),
            diagnostic.function,
            self.lang.message(diagnostic.key)
        );
        if self.wrap {
            format!("<wrap {}>{}</wrap>", diagnostic.severity, text)
        } else {
            text
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_plain_english_error() {
        let d = Diagnostic::alert("if", MessageKey::NotEnoughParams);
        assert_eq!(
            Formatter::default().render(&d),
            "**ERROR: if: not enough parameters were provided!**"
        );
    }

    #[test]
    fn wraps_with_severity_when_enabled() {
        let d = Diagnostic::important("foo", MessageKey::NoSuchFunction);
        let out = Formatter::new(Lang::En, true).render(&d);
        assert_eq!(
            out,
            "<wrap important>**ERROR: foo: there is no such function!**</wrap>"
        );
    }

    #[test]
    fn renders_portuguese_catalog() {
        let d = Diagnostic::alert("switch", MessageKey::InvalidSyntax);
        assert_eq!(
            Formatter::new(Lang::PtBr, false).render(&d),
            "**ERRO: switch: sintaxe inválida!**"
        );
    }

    #[test]
    fn parses_language_names() {
        assert_eq!("EN".parse::<Lang>(), Ok(Lang::En));
        assert_eq!("pt-BR".parse::<Lang>(), Ok(Lang::PtBr));
        assert!("fr".parse::<Lang>().is_err());
    }
}
