use crate::chat::{Reply, ReplyKind};
use crate::escalation::{LogOutcome, LogRow, Placement};
use crate::ui::{theme, Icons};
use owo_colors::OwoColorize;

pub fn header(text: &str) {
    println!("{} {}", Icons::ROCKET, text.style(theme().heading.clone()));
}

pub fn section(title: &str) {
    println!();
    println!("━{}━", title.style(theme().heading.clone()));
}

/// Print an `ask` reply with how it was reached
pub fn reply(reply: &Reply) {
    println!("{} {}", Icons::BRAIN, reply.answer.style(theme().answer.clone()));

    match &reply.kind {
        ReplyKind::Prompt => {}
        ReplyKind::Matched { id, distance } => {
            println!(
                "  {} {}",
                format!("matched entry #{}", id).style(theme().matched.clone()),
                detail(&format!("(distance {})", distance))
            );
        }
        ReplyKind::Escalated { distance, outcome } => {
            println!("  {}", detail(&format!("no match (distance {})", distance)));
            escalation(outcome);
        }
    }
}

fn escalation(outcome: &LogOutcome) {
    match outcome {
        LogOutcome::Logged(placement) => {
            let placed = match placement {
                Placement::FilledRow(row) => format!("filled row {}", row),
                Placement::Appended => "appended".to_string(),
                Placement::AppendedAfterReconnect => "appended after reconnect".to_string(),
            };
            println!("  {} {}", Icons::INBOX, format!("escalated, {}", placed).style(theme().escalated.clone()));
        }
        LogOutcome::Skipped(reason) => {
            eprintln!("  {} {}", Icons::WARN, format!("not escalated: {}", reason).style(theme().lost.clone()));
        }
        LogOutcome::LostAfterRetry(reason) => {
            eprintln!("  {} {}", Icons::CROSS, format!("escalation lost: {}", reason).style(theme().lost.clone()));
        }
    }
}

/// One pending worksheet row
pub fn backlog_row(row: &LogRow) {
    let distance = if row.distance.is_empty() { "-" } else { row.distance.as_str() };
    println!(
        "  {}  {}  {}",
        detail(&format!("{:>4}", row.row)),
        format!("{:>10}", distance).style(theme().escalated.clone()),
        row.question
    );
}

pub fn info(label: &str, value: &str) {
    println!("{} {}: {}", Icons::INFO, detail(label), value);
}

pub fn detail(text: &str) -> String {
    text.style(theme().detail.clone()).to_string()
}
