use std::io::{self, Write};
use std::rc::Rc;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind};

use gesturegate::core::{
    ClickEvent, Command, CommandBinding, InputEvent, RelayCommand, TargetId, TextChange,
    TextChangedEvent,
};
use gesturegate::kernel::services::adapters::{init_settings, AsyncRuntime};
use gesturegate::kernel::services::ports::BehaviorSettings;
use gesturegate::kernel::{BehaviorId, ChangeDebouncer, ClickDisambiguator, Dispatcher};
use gesturegate::tui::{ClickCounter, TerminalGuard, TerminationSignal};

mod logging;

const CLICK_TARGET: TargetId = TargetId(1);
const TEXT_TARGET: TargetId = TargetId(2);
const POLL_INTERVAL: Duration = Duration::from_millis(16);

type Cell = (u16, u16);

fn emit(line: &str) {
    let mut out = io::stdout();
    let _ = write!(out, "{}\r\n", line);
    let _ = out.flush();
}

fn attach_click(dispatcher: &mut Dispatcher, settings: &BehaviorSettings) -> BehaviorId {
    let interval = settings.double_click_interval();
    let single: Rc<dyn Command<Cell>> = Rc::new(RelayCommand::new(|cell: &Cell| {
        emit(&format!("single click at {:?}", cell))
    }));
    let double: Rc<dyn Command<Cell>> = Rc::new(RelayCommand::new(|cell: &Cell| {
        emit(&format!("double click at {:?}", cell))
    }));
    dispatcher.attach(CLICK_TARGET, "", move |timer, _| {
        ClickDisambiguator::new(timer, interval)
            .with_single_click(CommandBinding::new(single, (0, 0)))
            .with_double_click(CommandBinding::new(double, (0, 0)))
    })
}

fn attach_change(dispatcher: &mut Dispatcher, settings: &BehaviorSettings) -> BehaviorId {
    let delay = settings.debounce_delay();
    let report: Rc<dyn Command<TextChange>> = Rc::new(RelayCommand::new(|change: &TextChange| {
        emit(&format!(
            "text settled: {:?} -> {:?}",
            change.old_text, change.new_text
        ))
    }));
    dispatcher.attach(TEXT_TARGET, "", move |timer, initial| {
        ChangeDebouncer::new(timer, initial)
            .with_delay(delay)
            .with_command(report)
    })
}

/// Points both click bindings at the clicked cell before the click is delivered.
fn aim_click(dispatcher: &mut Dispatcher, id: BehaviorId, cell: Cell) -> io::Result<()> {
    let clicks = dispatcher
        .behavior_mut::<ClickDisambiguator<Cell>>(id)
        .map_err(io::Error::other)?;
    if let Some(binding) = clicks.single_click_mut() {
        binding.parameter = cell;
    }
    if let Some(binding) = clicks.double_click_mut() {
        binding.parameter = cell;
    }
    Ok(())
}

fn run(
    dispatcher: &mut Dispatcher,
    click_id: BehaviorId,
    counter: &mut ClickCounter,
    signals: &mpsc::Receiver<TerminationSignal>,
) -> io::Result<()> {
    let mut line = String::new();

    loop {
        if let Ok(signal) = signals.try_recv() {
            tracing::info!(?signal, "quitting on signal");
            return Ok(());
        }

        if event::poll(POLL_INTERVAL)? {
            match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    let edited = match key.code {
                        KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                            return Ok(())
                        }
                        KeyCode::Char(ch) => {
                            line.push(ch);
                            true
                        }
                        KeyCode::Backspace => line.pop().is_some(),
                        _ => false,
                    };
                    if edited {
                        let event = InputEvent::from(TextChangedEvent::new(line.as_str()));
                        dispatcher.deliver(TEXT_TARGET, &event);
                    }
                }
                Event::Mouse(mouse) => {
                    if let MouseEventKind::Down(MouseButton::Left) = mouse.kind {
                        let click: ClickEvent =
                            counter.on_mouse_down(mouse.column, mouse.row, Instant::now());
                        aim_click(dispatcher, click_id, (mouse.column, mouse.row))?;
                        dispatcher.deliver(CLICK_TARGET, &InputEvent::from(click));
                    }
                }
                _ => {}
            }
        }

        dispatcher.pump();
    }
}

fn main() -> io::Result<()> {
    let log_guard = logging::init();
    let settings = init_settings();
    tracing::info!(?settings, "starting demo host");

    let runtime = AsyncRuntime::new()?;
    let mut dispatcher = Dispatcher::with_runtime(&runtime);
    let click_id = attach_click(&mut dispatcher, &settings);
    attach_change(&mut dispatcher, &settings);

    let interval = settings.double_click_interval().resolve();
    let mut counter = ClickCounter::new(interval);

    let guard = TerminalGuard::new()?;
    let (signal_tx, signal_rx) = mpsc::channel();
    #[cfg(unix)]
    gesturegate::tui::terminal_guard::install_termination_signals(guard.restorer(), signal_tx)?;
    #[cfg(not(unix))]
    drop(signal_tx);

    emit(&format!(
        "click anywhere (double-click window {} ms), type to edit a line, Esc quits",
        interval.as_millis()
    ));
    if let Some(log_guard) = &log_guard {
        emit(&format!("logs: {}", log_guard.log_dir().display()));
    }

    let result = run(&mut dispatcher, click_id, &mut counter, &signal_rx);

    // Cancel anything still pending before the terminal is handed back.
    drop(dispatcher);
    drop(guard);
    result
}
