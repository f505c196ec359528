use anyhow::Result;
use tempfile::tempdir;

use recap::store::{Agent, CompleteOutcome, Database, Meeting, MeetingStatus, User};

#[test]
fn database_supports_core_meeting_workflow() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("recap.db");
    let db = Database::open_path(&db_path)?;

    let user = User::new("Alice".to_string());
    let agent = Agent::new("Bot".to_string(), "Be concise.".to_string());
    db.insert_user(&user)?;
    db.insert_agent(&agent)?;

    let meeting = Meeting::new(
        "Quarterly review".to_string(),
        user.id.clone(),
        agent.id.clone(),
    );
    db.insert_meeting(&meeting)?;

    // Webhook stand-in: call ended, transcript available.
    assert!(db.mark_processing(&meeting.id, "https://example.com/t.jsonl")?);

    let processing = db.list_meetings(10, Some(MeetingStatus::Processing), None)?;
    assert_eq!(processing.len(), 1);
    assert_eq!(processing[0].id, meeting.id);

    // The summarization job's single write.
    let outcome = db.complete_meeting(&meeting.id, "### Overview\nShort recap.")?;
    assert_eq!(outcome, CompleteOutcome::Completed);

    let final_meeting = db
        .get_meeting(&meeting.id)?
        .expect("meeting should still exist");
    assert_eq!(final_meeting.status, MeetingStatus::Completed);
    assert_eq!(
        final_meeting.summary.as_deref(),
        Some("### Overview\nShort recap.")
    );

    Ok(())
}

#[test]
fn list_filters_by_status_and_name() -> Result<()> {
    let tmp = tempdir()?;
    let db = Database::open_path(&tmp.path().join("recap.db"))?;

    let user = User::new("Alice".to_string());
    let agent = Agent::new("Bot".to_string(), "Be helpful.".to_string());
    db.insert_user(&user)?;
    db.insert_agent(&agent)?;

    let standup = Meeting::new("Daily standup".to_string(), user.id.clone(), agent.id.clone());
    let review = Meeting::new("Design review".to_string(), user.id.clone(), agent.id.clone());
    db.insert_meeting(&standup)?;
    db.insert_meeting(&review)?;
    db.cancel_meeting(&review.id)?;

    let cancelled = db.list_meetings(10, Some(MeetingStatus::Cancelled), None)?;
    assert_eq!(cancelled.len(), 1);
    assert_eq!(cancelled[0].id, review.id);

    let by_name = db.list_meetings(10, None, Some("standup"))?;
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].id, standup.id);

    Ok(())
}

#[test]
fn meeting_prefix_lookup_works() -> Result<()> {
    let tmp = tempdir()?;
    let db = Database::open_path(&tmp.path().join("recap.db"))?;

    let user = User::new("Alice".to_string());
    let agent = Agent::new("Bot".to_string(), "Be helpful.".to_string());
    db.insert_user(&user)?;
    db.insert_agent(&agent)?;

    let meeting = Meeting::new("Sync".to_string(), user.id, agent.id);
    db.insert_meeting(&meeting)?;

    let found = db.find_meeting_by_prefix(&meeting.id[..8])?;
    assert_eq!(found.map(|m| m.id), Some(meeting.id));

    assert!(db.find_meeting_by_prefix("zzzzzzzz")?.is_none());

    Ok(())
}

#[test]
fn step_ledger_survives_reopen() -> Result<()> {
    let tmp = tempdir()?;
    let db_path = tmp.path().join("recap.db");

    {
        let db = Database::open_path(&db_path)?;
        db.record_step("m1", "summarize", "\"the summary\"")?;
    }

    let db = Database::open_path(&db_path)?;
    assert_eq!(
        db.get_step("m1", "summarize")?.as_deref(),
        Some("\"the summary\"")
    );

    Ok(())
}
