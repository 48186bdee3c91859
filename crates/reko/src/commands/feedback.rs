use reko_telemetry::{read_jsonl, FeedbackRecord, Paths};

const DISPLAY_LIMIT: usize = 20;

fn compute_stats(records: &[FeedbackRecord]) -> String {
    if records.is_empty() {
        return "No ratings to analyze.".to_string();
    }
    let total = records.len();
    let positive = records.iter().filter(|r| r.is_positive()).count();
    let matched = records.iter().filter(|r| r.matched).count();
    let avg_rating = records.iter().map(|r| r.rating).sum::<f64>() / total as f64;

    format!(
        "Total ratings: {}\n\
         Useful: {}\n\
         Not useful: {}\n\
         Matched a reply: {}\n\
         Avg rating: {:.2}",
        total,
        positive,
        total - positive,
        matched,
        avg_rating
    )
}

fn format_recent(records: &[FeedbackRecord]) -> String {
    let recent: Vec<_> = records.iter().rev().take(DISPLAY_LIMIT).collect();
    let mut out = format!("Recent Ratings (last {})\n========================", recent.len());
    for record in recent {
        out.push_str(&format!(
            "\n  {} | {:+.1} | {} => {}",
            record.timestamp.format("%Y-%m-%d %H:%M"),
            record.rating,
            record.query,
            record.reply
        ));
    }
    out
}

pub fn run(stats: bool) -> anyhow::Result<()> {
    let paths = Paths::new()?;
    let records: Vec<FeedbackRecord> = read_jsonl(&paths.feedback_file())?;

    if records.is_empty() {
        println!("No rating history");
        return Ok(());
    }

    if stats {
        println!("{}", compute_stats(&records));
    } else {
        println!("{}", format_recent(&records));
    }
    Ok(())
}
