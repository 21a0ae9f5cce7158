//! `reflookup pick` - interactive lookup modal in the terminal
//!
//! Builds a page with a single reference field, opens the modal right away and
//! drives the runtime from terminal events until the modal closes. The field
//! group's record is printed afterwards.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use colored::*;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, KeyModifiers,
    MouseButton, MouseEventKind,
};
use log::{debug, warn};
use ratatui::DefaultTerminal;
use tokio::sync::mpsc;

use crate::cli::PickArgs;
use reflookup::form::ReferenceField;
use reflookup::view::{ModalLayout, render_modal};
use reflookup::{FieldValue, FormBuilder, HttpSearchClient, LookupConfig, LookupRuntime, Msg};

const FIELD_NAME: &str = "reference";
const EVENT_POLL: Duration = Duration::from_millis(100);

pub async fn handle_pick_command(args: PickArgs, config: LookupConfig) -> Result<()> {
    if args.url.trim().is_empty() {
        anyhow::bail!("Search endpoint must not be empty");
    }
    let client = HttpSearchClient::new(&config).context("Failed to build HTTP client")?;

    let form = FormBuilder::new(1)
        .reference(
            ReferenceField::new(FIELD_NAME, "Reference")
                .lookup_url(&args.url)
                .code(&args.code)
                .reference_key(&args.reference),
        )
        .build();
    let page = form.to_page();
    let control = page
        .open_controls()
        .next()
        .context("Form has no lookup control")?;

    let (record_tx, mut record_rx) = mpsc::unbounded_channel();
    let mut runtime =
        LookupRuntime::direct(config, page, Arc::new(client)).with_record_sink(record_tx);
    runtime.dispatch(Msg::OpenControlActivated(control));

    let mut terminal = ratatui::init();
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableMouseCapture) {
        warn!("Mouse capture unavailable: {}", e);
    }

    let result = run_event_loop(&mut terminal, &mut runtime).await;

    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result?;

    runtime.dispatch(Msg::FormSubmitted);
    let record = record_rx
        .try_recv()
        .context("Form record was not produced")?;

    match record.get(FIELD_NAME) {
        Some(FieldValue::Reference(value)) if !value.id.is_empty() || !value.code.is_empty() => {
            eprintln!(
                "{} {} {}",
                "Selected".bright_green().bold(),
                value.code.cyan(),
                value.name
            );
        }
        _ => eprintln!("{}", "Nothing selected".yellow()),
    }
    println!("{}", serde_json::to_string_pretty(&record)?);
    Ok(())
}

async fn run_event_loop(terminal: &mut DefaultTerminal, runtime: &mut LookupRuntime) -> Result<()> {
    let (event_tx, mut events) = mpsc::unbounded_channel();
    let reader = tokio::task::spawn_blocking(move || -> std::io::Result<()> {
        while !event_tx.is_closed() {
            if event::poll(EVENT_POLL)? {
                if event_tx.send(event::read()?).is_err() {
                    break;
                }
            }
        }
        Ok(())
    });

    let outcome = loop {
        let mut layout = None;
        if let Err(e) = terminal.draw(|frame| layout = render_modal(frame, frame.area(), runtime.widget())) {
            break Err(e).context("Failed to draw lookup modal");
        }

        let Some(layout) = layout else {
            debug!("Lookup modal closed");
            break Ok(());
        };
        let list_height = layout.list.height as usize;
        if runtime.widget().results().viewport_height() != Some(list_height) {
            runtime.dispatch(Msg::SetViewportHeight(list_height));
        }

        tokio::select! {
            Some(event) = events.recv() => {
                if let Some(msg) = event_to_msg(&event, &layout, runtime) {
                    runtime.dispatch(msg);
                }
            }
            Some(msg) = runtime.next_message() => runtime.dispatch(msg),
            else => break Ok(()),
        }
    };

    drop(events);
    match reader.await {
        Ok(Err(e)) => warn!("Terminal event reader failed: {}", e),
        Err(e) => warn!("Terminal event reader panicked: {}", e),
        Ok(Ok(())) => {}
    }
    outcome
}

fn event_to_msg(event: &Event, layout: &ModalLayout, runtime: &LookupRuntime) -> Option<Msg> {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => {
            if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
                return Some(Msg::CloseClicked);
            }
            Some(Msg::SearchKey(key.code))
        }
        Event::Mouse(mouse) if mouse.kind == MouseEventKind::Down(MouseButton::Left) => {
            layout.click(mouse.column, mouse.row)
        }
        Event::Paste(text) => {
            let search = runtime.widget().search();
            let mut value = if search.selected_all { String::new() } else { search.value.clone() };
            value.push_str(text);
            Some(Msg::SearchChanged(value))
        }
        _ => None,
    }
}
