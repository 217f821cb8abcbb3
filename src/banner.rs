//! Startup banner and session summary display.

use crate::completion::UsageTotals;
use crate::consts::format_number;
use crate::locale::Locale;

/// Session configuration for display in the startup banner.
pub struct BannerInfo<'a> {
    pub model: &'a str,
    pub vendors: usize,
    pub tasks: usize,
    pub max_input_chars: usize,
    pub max_output_tokens: u32,
    pub locale: Locale,
}

/// Print the startup banner with session info.
pub fn print_banner(info: &BannerInfo) {
    println!("{}", banner_text(info));
}

fn banner_text(info: &BannerInfo) -> String {
    let (vendors, tasks, limits) = match info.locale {
        Locale::English => ("vendors", "use cases", "limits"),
        Locale::German => ("Hersteller", "Anwendungsfälle", "Grenzen"),
    };
    format!(
        r#"
   ╔═══════════════════════════════════════╗
   ║        S T O R A G E   C O P I L O T  ║
   ╚═══════════════════════════════════════╝

   version   {}
   model     {}
   {:<9} {}
   {:<9} {}
   {:<9} {} chars in, {} tokens out
   language  {}

   {}
"#,
        env!("CARGO_PKG_VERSION"),
        info.model,
        vendors,
        info.vendors,
        tasks,
        info.tasks,
        limits,
        format_number(info.max_input_chars as u64),
        format_number(u64::from(info.max_output_tokens)),
        info.locale.label(),
        disclaimer(info.locale),
    )
}

/// Advisory notice shown with the banner and with one-shot output.
pub fn disclaimer(locale: Locale) -> &'static str {
    match locale {
        Locale::English => "Advisory only. Always validate outputs before use.",
        Locale::German => "Nur zur Beratung. Ergebnisse immer vor der Verwendung prüfen.",
    }
}

/// "Model: m • Tokens: n" under each result; `N/A` when the provider
/// reported no total.
pub fn result_caption(model: &str, total_tokens: Option<u64>, locale: Locale) -> String {
    let model_label = match locale {
        Locale::English => "Model",
        Locale::German => "Modell",
    };
    let tokens = total_tokens.map_or_else(|| "N/A".to_string(), format_number);
    format!("{model_label}: {model} • Tokens: {tokens}")
}

/// "Tokens: n | Requests: m" in the given language.
pub fn usage_line(totals: UsageTotals, locale: Locale) -> String {
    let requests = match locale {
        Locale::English => "Requests",
        Locale::German => "Anfragen",
    };
    format!(
        "Tokens: {} | {requests}: {}",
        format_number(totals.total_tokens),
        format_number(totals.requests),
    )
}

/// Print the session summary (token usage + farewell).
pub fn print_session_summary(totals: Option<UsageTotals>, locale: Locale) {
    match totals {
        Some(totals) if totals.requests > 0 => println!("{}", usage_line(totals, locale)),
        Some(_) => {}
        None => eprintln!("usage totals unavailable"),
    }
    println!("goodbye.");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(locale: Locale) -> BannerInfo<'static> {
        BannerInfo {
            model: "gpt-4o-mini",
            vendors: 3,
            tasks: 12,
            max_input_chars: 5000,
            max_output_tokens: 1500,
            locale,
        }
    }

    #[test]
    fn banner_shows_counts_and_limits() {
        let text = banner_text(&info(Locale::English));
        assert!(text.contains("gpt-4o-mini"));
        assert!(text.contains("vendors   3"));
        assert!(text.contains("use cases 12"));
        assert!(text.contains("5,000 chars in, 1,500 tokens out"));
    }

    #[test]
    fn banner_is_localized() {
        let text = banner_text(&info(Locale::German));
        assert!(text.contains("Anwendungsfälle 12"));
        assert!(text.contains("German / Deutsch"));
    }

    #[test]
    fn banner_carries_advisory_notice() {
        assert!(banner_text(&info(Locale::English)).contains("Advisory only. Always validate outputs"));
        assert!(banner_text(&info(Locale::German)).contains("Nur zur Beratung."));
    }

    #[test]
    fn caption_shows_model_and_total() {
        assert_eq!(
            result_caption("gpt-4o-mini", Some(12345), Locale::English),
            "Model: gpt-4o-mini • Tokens: 12,345"
        );
        assert_eq!(
            result_caption("gpt-4o-mini", Some(7), Locale::German),
            "Modell: gpt-4o-mini • Tokens: 7"
        );
    }

    #[test]
    fn caption_without_total_is_na() {
        assert_eq!(
            result_caption("unknown", None, Locale::English),
            "Model: unknown • Tokens: N/A"
        );
    }

    #[test]
    fn usage_line_localized() {
        let totals = UsageTotals {
            total_tokens: 1234,
            requests: 3,
        };
        assert_eq!(usage_line(totals, Locale::English), "Tokens: 1,234 | Requests: 3");
        assert_eq!(usage_line(totals, Locale::German), "Tokens: 1,234 | Anfragen: 3");
    }

    #[test]
    fn print_session_summary_does_not_panic() {
        print_session_summary(Some(UsageTotals::default()), Locale::English);
        print_session_summary(None, Locale::German);
    }
}
