//! Terminal rendering for conversations and reports.

use chrono::DateTime;
use colored::Colorize;
use daysync_application::{AdviceList, ChartSlot, InsightsReport, SessionSummary, TodayStatus};
use daysync_core::entry::DayEntry;
use daysync_core::session::{ChatMessage, ChatSession, MessageRole};

const BAR_WIDTH: usize = 40;

pub fn message(message: &ChatMessage) {
    match message.role {
        MessageRole::User => println!("{} {}", "you>".green().bold(), message.content),
        MessageRole::Assistant => println!("{} {}", "daysync>".bright_blue().bold(), message.content),
    }
}

pub fn assistant(text: &str) {
    println!("{} {}", "daysync>".bright_blue().bold(), text);
}

pub fn hint(text: &str) {
    println!("{}", text.bright_black());
}

pub fn warning(text: &str) {
    println!("{} {}", "warning:".yellow().bold(), text.yellow());
}

pub fn error(text: &str) {
    println!("{} {}", "error:".red().bold(), text.red());
}

pub fn heading(text: &str) {
    println!("\n{}", text.bright_magenta().bold());
}

pub fn transcript(session: &ChatSession) {
    heading(&format!("{}  [{}]", session.title, short_id(&session.id)));
    for m in &session.messages {
        message(m);
    }
}

/// The analysis shown once a check-in completes.
pub fn entry(entry: &DayEntry) {
    let analysis = &entry.analysis;
    heading(&format!("Day synced: {}", entry.date.format("%A, %B %-d")));
    println!("{} {}", "Summary:".bold(), analysis.summary);
    println!(
        "{} {}",
        "Happiness:".bold(),
        score_bar(entry.happiness_score(), BAR_WIDTH)
    );
    if !analysis.detected_emotions.is_empty() {
        println!(
            "{} {}",
            "Emotions:".bold(),
            analysis.detected_emotions.join(", ").cyan()
        );
    }
    if let Some(insight) = &analysis.pattern_insight {
        println!("{} {}", "Pattern:".bold(), insight.italic());
    }
    for (i, item) in analysis.advice.iter().enumerate() {
        println!("  {}. {}", i + 1, item);
    }
}

pub fn insights(report: &InsightsReport) {
    heading("Weekly Insights");
    println!("{}", report.headline.italic());
    println!();
    for slot in &report.slots {
        match slot {
            ChartSlot::Filled(point) => println!(
                "  {} {}  {}",
                point.weekday,
                point.date.format("%m-%d").to_string().bright_black(),
                score_bar(point.score, BAR_WIDTH)
            ),
            ChartSlot::Empty => println!("  {}", "---".bright_black()),
        }
    }
    println!();
    if report.window.is_empty() {
        hint("No entries yet. Run `daysync check-in` to add one.");
    } else {
        println!("{} {}", "Average mood:".bold(), report.mean);
    }
}

pub fn advice(list: &AdviceList) {
    heading("Advice");
    if list.is_empty() {
        hint("No advice yet. Complete a check-in first.");
        return;
    }
    for item in &list.items {
        println!("  {}. {}", item.rank.to_string().bright_cyan(), item.text);
    }
}

pub fn today(status: &TodayStatus) {
    heading(&format!("Today ({})", status.today));
    match (&status.entry, status.reminder()) {
        (Some(entry), _) => {
            println!("{} {}", "Summary:".bold(), entry.analysis.summary);
            println!(
                "{} {}",
                "Happiness:".bold(),
                score_bar(entry.happiness_score(), BAR_WIDTH)
            );
        }
        (None, Some(reminder)) => println!("{}", reminder.yellow()),
        (None, None) => {}
    }
}

pub fn session_list(summaries: &[SessionSummary], active: Option<&str>) {
    heading("Sessions");
    if summaries.is_empty() {
        hint("No sessions yet. Run `daysync chat` to start one.");
        return;
    }
    for summary in summaries {
        let marker = if active == Some(summary.id.as_str()) { "*" } else { " " };
        let updated = DateTime::from_timestamp_millis(summary.updated_at)
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_default();
        println!(
            "{} {}  {}  {} {}",
            marker.green(),
            short_id(&summary.id).bright_cyan(),
            summary.title,
            updated.bright_black(),
            format!("({} messages)", summary.message_count).bright_black()
        );
    }
}

pub fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}

fn score_bar(score: u8, width: usize) -> String {
    let filled = usize::from(score) * width / 100;
    let bar = format!("{}{}", "#".repeat(filled), ".".repeat(width - filled));
    let painted = match score {
        0..=39 => bar.red(),
        40..=69 => bar.yellow(),
        _ => bar.green(),
    };
    format!("{painted} {score:>3}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("0123456789abcdef"), "01234567");
        assert_eq!(short_id("abc"), "abc");
    }

    #[test]
    fn test_score_bar_width() {
        colored::control::set_override(false);
        assert_eq!(score_bar(0, 10), format!("{} {:>3}", ".".repeat(10), 0));
        assert_eq!(score_bar(50, 10), "#####.....  50");
        assert_eq!(score_bar(100, 10), "########## 100");
    }
}
