//! Colored formatting for provider errors.

use console::style;

pub fn style_llm_error(message: &str) -> String {
    style(message).red().to_string()
}

pub fn style_provider_name(provider: &str) -> String {
    let styled_name = match provider.to_lowercase().as_str() {
        "openai" => style(provider).yellow(),
        "deepseek" => style(provider).blue(),
        _ => style(provider).cyan(),
    };
    styled_name.to_string()
}

/// Format an LLM error for display with the provider name prefixed
pub fn format_llm_error(provider: &str, error: &str) -> String {
    format!("{} {}", style_provider_name(provider), style_llm_error(error))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formatted_error_keeps_provider_and_message() {
        let formatted = format_llm_error("OpenAI", "HTTP 500: boom");
        let plain = console::strip_ansi_codes(&formatted);
        assert_eq!(plain, "OpenAI HTTP 500: boom");
    }
}
