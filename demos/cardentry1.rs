use log::debug;
use rat_cardentry::HasScreenCursor;
use rat_cardentry::card_entry::{CardEntry, CardEntryState, handle_events};
use rat_cardentry::event::TextOutcome;
use rat_event::ct_event;
use ratatui_core::buffer::Buffer;
use ratatui_core::layout::{Constraint, Layout, Rect};
use ratatui_core::style::{Style, Stylize};
use ratatui_core::terminal::Terminal;
use ratatui_core::text::Line;
use ratatui_core::widgets::{StatefulWidget, Widget};
use ratatui_crossterm::crossterm::ExecutableCommand;
use ratatui_crossterm::crossterm::cursor::{DisableBlinking, EnableBlinking, SetCursorStyle};
use ratatui_crossterm::crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use ratatui_crossterm::crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui_crossterm::{CrosstermBackend, crossterm};
use ratatui_widgets::block::Block;
use std::cell::RefCell;
use std::fs;
use std::io::stdout;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

fn main() -> Result<(), anyhow::Error> {
    setup_logging()?;

    let status = Rc::new(RefCell::new(String::new()));

    let mut card = CardEntryState::named("card")
        .with_selection_fix(true)
        .with_animation(true);
    let st = status.clone();
    card.on_pin_change(move |complete, len| {
        debug!("pin-change {} {}", complete, len);
        *st.borrow_mut() = format!("complete: {} digits: {}", complete, len);
    });
    card.on_number_change(|numbers| {
        debug!("number-change {:?}", numbers);
    });

    let mut state = State {
        card,
        status,
        quit: false,
    };

    run_ui(&mut state)
}

struct State {
    card: CardEntryState,
    status: Rc<RefCell<String>>,
    quit: bool,
}

fn run_ui(state: &mut State) -> Result<(), anyhow::Error> {
    enable_raw_mode()?;
    stdout().execute(EnterAlternateScreen)?;
    stdout().execute(EnableMouseCapture)?;
    stdout().execute(EnableBlinking)?;
    stdout().execute(SetCursorStyle::BlinkingBar)?;
    stdout().execute(EnableBracketedPaste)?;

    let mut terminal = Terminal::new(CrosstermBackend::new(stdout()))?;
    terminal.clear()?;

    let r = 'l: loop {
        if let Err(e) = terminal.draw(|frame| {
            let area = frame.area();
            render(frame.buffer_mut(), area, state);
            if let Some(cursor) = state.card.screen_cursor() {
                frame.set_cursor_position(cursor);
            }
        }) {
            break 'l Err(e.into());
        }

        // keep repainting while the animation runs.
        let mut changed = false;
        while !changed {
            if state.card.tick() {
                changed = true;
            }
            match crossterm::event::poll(Duration::from_millis(10)) {
                Ok(true) => {
                    let event = match crossterm::event::read() {
                        Ok(v) => v,
                        Err(e) => break 'l Err(e.into()),
                    };
                    match event {
                        ct_event!(key press CONTROL-'q') => state.quit = true,
                        _ => match handle_events(&mut state.card, true, &event) {
                            TextOutcome::Continue | TextOutcome::Unchanged => {}
                            TextOutcome::Changed => changed = true,
                            TextOutcome::TextChanged => {
                                debug!("text-changed {:?}", state.card.display_text());
                                changed = true;
                            }
                        },
                    }
                }
                Ok(false) => {}
                Err(e) => break 'l Err(e.into()),
            }
            if state.quit {
                break 'l Ok(());
            }
        }
    };

    stdout().execute(DisableBracketedPaste)?;
    stdout().execute(SetCursorStyle::DefaultUserShape)?;
    stdout().execute(DisableBlinking)?;
    stdout().execute(DisableMouseCapture)?;
    stdout().execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;

    r
}

fn render(buf: &mut Buffer, area: Rect, state: &mut State) {
    let card = CardEntry::new()
        .block(Block::bordered().title("Card number"))
        .style(Style::new().white().on_black())
        .focus_style(Style::new().white().on_dark_gray())
        .filled_line_style(Style::new().green());
    let size = card.size(state.card.partition());

    let l = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(size.height),
        Constraint::Length(1),
        Constraint::Fill(1),
        Constraint::Length(1),
    ])
    .split(area);
    let l_card = Layout::horizontal([Constraint::Length(2), Constraint::Length(size.width)])
        .split(l[1])[1];

    card.render(l_card, buf, &mut state.card);

    Line::from(format!(
        "numbers: {:?}  {}",
        state.card.numbers(),
        state.status.borrow()
    ))
    .render(l[2], buf);
    Line::from("Ctrl-Q quit")
        .black()
        .on_cyan()
        .render(l[4], buf);
}

fn setup_logging() -> Result<(), anyhow::Error> {
    let log = PathBuf::from("log.log");
    if log.exists() {
        fs::remove_file(&log)?;
    }
    fern::Dispatch::new()
        .format(|out, message, _record| out.finish(format_args!("{}", message)))
        .level(log::LevelFilter::Debug)
        .chain(fern::log_file(&log)?)
        .apply()?;
    Ok(())
}
