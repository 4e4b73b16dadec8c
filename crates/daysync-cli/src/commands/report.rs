use crate::render;
use anyhow::{Result, bail};
use daysync_application::AppContext;

pub async fn run_insights(context: &AppContext) -> Result<()> {
    let report = context.insights().report().await?;
    render::insights(&report);
    Ok(())
}

pub async fn run_advice(context: &AppContext) -> Result<()> {
    let list = context.advice().current().await?;
    render::advice(&list);
    Ok(())
}

pub async fn run_today(context: &AppContext) -> Result<()> {
    let status = context.today().await?;
    render::today(&status);
    Ok(())
}

pub async fn run_sessions(context: &AppContext) -> Result<()> {
    let companion = context.companion();
    if let Some(warning) = companion.bootstrap().await? {
        render::warning(&warning);
    }
    let active = companion.active_id().await;
    render::session_list(&companion.archive().await, active.as_deref());
    Ok(())
}

pub async fn run_wipe(context: &AppContext, confirmed: bool) -> Result<()> {
    if !confirmed {
        bail!("This deletes every entry and chat session. Re-run with --yes to confirm.");
    }
    context.wipe().await?;
    render::hint("All DaySync data deleted.");
    Ok(())
}
