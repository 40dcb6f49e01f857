//! Interactive triage session: listing, then rebase/merge/refresh menus

use crate::cli::context::CommandContext;
use crate::cli::display::print_listing;
use crate::cli::progress::CliProgress;
use crate::cli::style::{Stylize, check, cross, spinner_style};
use crate::cli::watch::run_watch;
use anstream::{eprintln, println};
use dialoguer::{Confirm, Input};
use indicatif::ProgressBar;
use renovate_triage::actions::{
    MenuAction, MenuKind, MergePlan, Selection, execute_merge_batch, execute_rebase_batch,
};
use renovate_triage::error::{Error, Result};
use renovate_triage::triage::TriageSnapshot;
use renovate_triage::types::ChangeRequest;
use std::time::Duration;
use tracing::warn;

fn prompt() -> Result<String> {
    Input::<String>::new()
        .with_prompt(">")
        .allow_empty(true)
        .interact_text()
        .map_err(|e| Error::Internal(format!("Failed to read input: {e}")))
}

fn confirm(question: &str) -> Result<bool> {
    Confirm::new()
        .with_prompt(question)
        .default(false)
        .interact()
        .map_err(|e| Error::Internal(format!("Failed to read confirmation: {e}")))
}

/// Fetch with a spinner. A failed fetch is reported and treated as "no PRs".
async fn fetch(ctx: &CommandContext) -> TriageSnapshot {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(spinner_style());
    spinner.set_message(format!("Fetching PRs from {}...", ctx.config.platform.slug().emphasis()));
    spinner.enable_steady_tick(Duration::from_millis(80));

    match ctx.fetch_snapshot().await {
        Ok(snapshot) => {
            spinner.finish_with_message(format!(
                "{} Fetched {} PR(s)",
                check(),
                snapshot.groups.len().accent()
            ));
            snapshot
        }
        Err(e) => {
            spinner.finish_and_clear();
            warn!(error = %e, "failed to fetch PRs");
            eprintln!("{} {}", cross(), e.to_string().error());
            TriageSnapshot::default()
        }
    }
}

/// Fetch once and print the listing (`triage list`)
pub async fn run_list(ctx: &CommandContext) -> Result<()> {
    let snapshot = fetch(ctx).await;
    if snapshot.is_empty() {
        println!("{}", "No open Renovate PRs found".muted());
    } else {
        print_listing(&snapshot, &ctx.config);
    }
    Ok(())
}

/// Run the interactive menu until the operator quits
pub async fn run_interactive(ctx: &CommandContext) -> Result<()> {
    let mut snapshot = fetch(ctx).await;
    if snapshot.is_empty() {
        println!("{}", "No open Renovate PRs found".muted());
        return Ok(());
    }
    print_listing(&snapshot, &ctx.config);

    loop {
        println!("\n{}", "Actions:".emphasis());
        for (key, action) in MenuAction::ALL {
            println!("  [{}] {}", key.accent(), action.label());
        }

        let action = match MenuAction::parse(&prompt()?) {
            Ok(action) => action,
            Err(e) => {
                eprintln!("{}", e.to_string().warn());
                continue;
            }
        };

        match action {
            MenuAction::Quit => break,
            MenuAction::Rebase => rebase_menu(ctx, &snapshot).await?,
            MenuAction::Merge => merge_menu(ctx, &snapshot).await?,
            MenuAction::Refresh => {
                println!("\nRefreshing PR list...");
                let fresh = fetch(ctx).await;
                if fresh.is_empty() {
                    println!("{}", "No open Renovate PRs found".muted());
                } else {
                    snapshot = fresh;
                    print_listing(&snapshot, &ctx.config);
                }
            }
        }
    }

    Ok(())
}

fn print_submenu(title: &str, menu: MenuKind) {
    println!("\n{}", title.emphasis());
    println!("  [{}] Single PR by list number", "number".accent());
    for (key, category) in menu.shorthands() {
        println!(
            "  [{}] All {} PRs",
            key.accent(),
            category.as_str().to_uppercase()
        );
    }
    let all: Vec<String> = menu
        .all_categories()
        .iter()
        .map(|c| c.as_str().to_uppercase())
        .collect();
    println!("  [{}] ALL of {}", "a".accent(), all.join(", "));
    println!("  [{}] Back", "b".accent());
}

/// Read a submenu choice and resolve it. `None` means nothing to do.
fn select(menu: MenuKind, snapshot: &TriageSnapshot) -> Result<Option<Vec<ChangeRequest>>> {
    let selection = match Selection::parse(&prompt()?, menu) {
        Ok(Selection::Back) => return Ok(None),
        Ok(selection) => selection,
        Err(e) => {
            eprintln!("{}", e.to_string().warn());
            return Ok(None);
        }
    };

    match selection.resolve(menu, snapshot) {
        Ok(prs) if prs.is_empty() => {
            println!("{}", "No PRs in that category".muted());
            Ok(None)
        }
        Ok(prs) => Ok(Some(prs)),
        Err(e) => {
            eprintln!("{}", e.to_string().warn());
            Ok(None)
        }
    }
}

async fn rebase_menu(ctx: &CommandContext, snapshot: &TriageSnapshot) -> Result<()> {
    print_submenu("Rebase options:", MenuKind::Rebase);
    let Some(prs) = select(MenuKind::Rebase, snapshot)? else {
        return Ok(());
    };

    println!(
        "\nAdding rebase label to {} PR(s)...",
        prs.len().accent()
    );
    let result = execute_rebase_batch(ctx.platform.as_ref(), &ctx.config, &prs, &CliProgress).await;

    match result.workflow_triggered {
        Some(true) => println!("  {} Workflow triggered", check()),
        Some(false) => eprintln!("  {} Failed to trigger workflow", cross()),
        None => {}
    }

    println!(
        "\nLabeled {} PRs",
        format!("{}/{}", result.labeled.len(), result.total()).success()
    );
    if result.dry_run {
        println!("{}", "Dry run: no labels were added".muted());
    } else {
        println!("{}", "Use [s] to check rebase status after a few minutes".muted());
    }
    Ok(())
}

async fn merge_menu(ctx: &CommandContext, snapshot: &TriageSnapshot) -> Result<()> {
    print_submenu("Merge options:", MenuKind::Merge);
    let Some(prs) = select(MenuKind::Merge, snapshot)? else {
        return Ok(());
    };

    let plan = MergePlan::new(&prs);
    if plan.needs_confirmation() && !confirm(&format!("Merge {} PRs?", plan.len()))? {
        println!("{}", "Cancelled".muted());
        return Ok(());
    }

    println!("\nMerging {} PR(s)...", plan.len().accent());
    let result = execute_merge_batch(
        ctx.platform.as_ref(),
        &ctx.clock,
        &ctx.config,
        &plan,
        &CliProgress,
    )
    .await;

    println!(
        "\nMerged {} PRs",
        format!("{}/{}", result.merged.len(), result.total()).success()
    );
    if result.dry_run {
        println!("{}", "Dry run: nothing was merged".muted());
        return Ok(());
    }

    if !result.has_watch_targets() {
        if !result.merged.is_empty() {
            println!("{}", "No app names could be extracted from PRs".muted());
        }
        return Ok(());
    }

    if confirm(&format!(
        "Watch {} app(s) for reconciliation?",
        result.watch_targets.len()
    ))? {
        run_watch(&ctx.cluster, &ctx.clock, &ctx.config, &result.watch_targets).await;
    }
    Ok(())
}
