use chrono::{DateTime, Utc};
use colored::Colorize;
use textflow::api::{CmdMessage, MessageLevel};
use textflow::metrics::{TextStats, INSTAGRAM_LIMIT, TWEET_LIMIT};
use textflow::model::{HistorySummary, Page, TextRecord, User};
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const LINE_WIDTH: usize = 100;
const TIME_WIDTH: usize = 14;
const COUNTS_WIDTH: usize = 18;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => println!("{}", message.content.yellow()),
            MessageLevel::Error => println!("{}", message.content.red()),
        }
    }
}

pub(super) fn print_stats(stats: &TextStats) {
    let rows = [
        ("Characters", stats.total_chars.to_string()),
        (
            "Without whitespace",
            stats.total_chars_without_whitespace.to_string(),
        ),
        ("Bytes (UTF-8)", stats.byte_length.to_string()),
        ("Lines", stats.line_count.to_string()),
        ("Words", stats.word_count.to_string()),
        ("Paragraphs", stats.paragraph_count.to_string()),
        ("Manuscript pages", stats.manuscript_pages.to_string()),
        (
            "Tweet remaining",
            format!("{} / {}", stats.tweet_remaining, TWEET_LIMIT),
        ),
        (
            "Instagram remaining",
            format!("{} / {}", stats.instagram_remaining, INSTAGRAM_LIMIT),
        ),
    ];

    for (label, value) in rows {
        println!("{} {}", format!("{:<20}", label).dimmed(), value.bold());
    }
}

pub(super) fn print_history(record: &TextRecord) {
    println!(
        "{} {}",
        format!("#{}", record.id).yellow(),
        record.title.bold()
    );
    println!(
        "{}",
        format!(
            "{} · {} chars · {} lines · {}",
            record.content_type,
            record.char_count,
            record.line_count,
            record.created_at.format("%Y-%m-%d %H:%M")
        )
        .dimmed()
    );
    println!("--------------------------------");
    println!("{}", record.content);
}

pub(super) fn print_history_page(page: &Page<HistorySummary>) {
    if page.is_empty() {
        if page.total_items > 0 {
            println!("No histories on page {}.", page.page + 1);
        } else {
            println!("No histories found.");
        }
        return;
    }

    for summary in &page.items {
        let idx_str = format!("{:>4}. ", summary.id.0);
        let counts = format!(
            "{:>width$}",
            format!("{}c {}l", summary.char_count, summary.line_count),
            width = COUNTS_WIDTH
        );
        let time_ago = format_time_ago(summary.created_at);

        let fixed_width = idx_str.width() + COUNTS_WIDTH + TIME_WIDTH;
        let available = LINE_WIDTH.saturating_sub(fixed_width);

        let one_line: String = summary
            .title
            .chars()
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        let title_display = truncate_to_width(&one_line, available);
        let padding = available.saturating_sub(title_display.width());

        println!(
            "{}{}{}{}{}",
            idx_str.yellow(),
            title_display,
            " ".repeat(padding),
            counts.dimmed(),
            time_ago.dimmed()
        );
    }

    if page.total_pages > 1 {
        println!(
            "{}",
            format!(
                "Page {} of {} ({} histories)",
                page.page + 1,
                page.total_pages,
                page.total_items
            )
            .dimmed()
        );
    }
}

pub(super) fn print_user(user: &User, history_count: Option<u64>) {
    println!("{} <{}>", user.username.bold(), user.email);
    print_field("Plan", &user.plan);
    print_field("Joined", &user.created_at.format("%Y-%m-%d").to_string());
    if let Some(last) = user.last_login_at {
        print_field("Last login", format_time_ago(last).trim());
    }
    if let Some(count) = history_count {
        print_field("Histories", &count.to_string());
    }
}

fn print_field(label: &str, value: &str) {
    println!("{} {}", format!("{:<12}", label).dimmed(), value);
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    let mut result = String::new();
    let mut current_width = 0;

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }

    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}
