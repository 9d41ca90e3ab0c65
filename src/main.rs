use anyhow::Result;
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};
use std::io;
use std::path::Path;
use std::rc::Rc;
use tui_textarea::TextArea;

use puzzlore::{
    AnswerResult, Catalog, Config, Constellation, FileStore, ProgressStore, ProgressionEngine,
    Preference, PuzzleSession, Settings,
};

enum GameState {
    Onboarding,
    TitleScreen,
    StarMap,
    ConstellationDetail,
    Playing,
    Solved,
    Reward,
    Unlock,
    Spirits,
    Settings,
    ConfirmReset,
}

#[derive(Clone, Copy, PartialEq)]
enum MenuOption {
    Continue,
    StarMap,
    Spirits,
    Settings,
    Reset,
    Quit,
}

impl MenuOption {
    const ALL: [MenuOption; 6] = [
        MenuOption::Continue,
        MenuOption::StarMap,
        MenuOption::Spirits,
        MenuOption::Settings,
        MenuOption::Reset,
        MenuOption::Quit,
    ];

    fn label(&self) -> &'static str {
        match self {
            MenuOption::Continue => "  CONTINUE  ",
            MenuOption::StarMap => "  STAR MAP  ",
            MenuOption::Spirits => "  SPIRITS  ",
            MenuOption::Settings => "  SETTINGS  ",
            MenuOption::Reset => "  RESET PROGRESS  ",
            MenuOption::Quit => "  QUIT  ",
        }
    }

    fn step(&self, forward: bool) -> Self {
        let i = Self::ALL.iter().position(|o| o == self).unwrap_or(0);
        let n = Self::ALL.len();
        Self::ALL[if forward { (i + 1) % n } else { (i + n - 1) % n }]
    }
}

struct App<'a> {
    engine: ProgressionEngine,
    settings: Settings,
    settings_store: FileStore,
    constellations: Vec<Rc<Constellation>>,
    map_cursor: usize,
    puzzle_cursor: usize,
    settings_cursor: usize,
    session: Option<PuzzleSession>,
    editor: TextArea<'a>,
    message: String,
    message_style: Style,
    state: GameState,
    menu_selection: MenuOption,
}

fn answer_editor<'a>() -> TextArea<'a> {
    let mut editor = TextArea::default();
    editor.set_block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Your Answer [Enter: Submit | F1: Hint | F2: Boost | Esc: Back] "),
    );
    editor.set_cursor_line_style(Style::default());
    editor
}

impl<'a> App<'a> {
    fn new(engine: ProgressionEngine, settings_store: FileStore) -> Self {
        let settings = Settings::load(&settings_store);
        let constellations = engine.catalog().load_constellations();
        let state = if settings.has_completed_onboarding {
            GameState::TitleScreen
        } else {
            GameState::Onboarding
        };

        App {
            engine,
            settings,
            settings_store,
            constellations,
            map_cursor: 0,
            puzzle_cursor: 0,
            settings_cursor: 0,
            session: None,
            editor: answer_editor(),
            message: String::new(),
            message_style: Style::default().fg(Color::Yellow),
            state,
            menu_selection: MenuOption::Continue,
        }
    }

    fn selected_constellation(&self) -> Option<Rc<Constellation>> {
        self.constellations.get(self.map_cursor).cloned()
    }

    fn finish_onboarding(&mut self) {
        self.settings.complete_onboarding(&mut self.settings_store);
        self.state = GameState::TitleScreen;
    }

    // One row per preference, then "replay introduction"
    fn activate_setting(&mut self) {
        match Preference::ALL.get(self.settings_cursor) {
            Some(&preference) => {
                let enabled = self.settings.toggle(preference, &mut self.settings_store);
                log::info!("{} {}", preference.label(), if enabled { "on" } else { "off" });
            }
            None => {
                self.settings.reset_onboarding(&mut self.settings_store);
                self.state = GameState::Onboarding;
            }
        }
    }

    fn continue_game(&mut self) {
        match self.engine.next_puzzle() {
            Some((puzzle, constellation)) if self.engine.is_puzzle_available(&puzzle) => {
                self.map_cursor = self
                    .constellations
                    .iter()
                    .position(|c| c.id == constellation.id)
                    .unwrap_or(0);
                self.puzzle_cursor = constellation
                    .puzzles
                    .iter()
                    .position(|p| p.id == puzzle.id)
                    .unwrap_or(0);
                self.start_puzzle();
            }
            // Everything solved, or the next puzzle is still locked
            _ => self.state = GameState::StarMap,
        }
    }

    fn open_constellation(&mut self) {
        let Some(constellation) = self.selected_constellation() else {
            return;
        };
        if !self.engine.is_constellation_unlocked(&constellation) {
            self.message = format!(
                "{} is still hidden. Complete the previous constellation to reveal it.",
                constellation.name
            );
            self.message_style = Style::default().fg(Color::DarkGray);
            return;
        }
        self.message.clear();
        self.puzzle_cursor = 0;
        self.state = GameState::ConstellationDetail;
    }

    fn start_puzzle(&mut self) {
        let Some(constellation) = self.selected_constellation() else {
            return;
        };
        let Some(puzzle) = constellation.puzzles.get(self.puzzle_cursor).cloned() else {
            return;
        };

        self.engine.set_current_puzzle(Some(puzzle.id.clone()));
        self.session = Some(PuzzleSession::new(puzzle));
        self.editor = answer_editor();
        self.message = String::from("Read the stars. Spell what they show...");
        self.message_style = Style::default().fg(Color::Yellow);
        self.state = GameState::Playing;
    }

    fn input(&self) -> String {
        self.editor.lines().join("")
    }

    fn submit_answer(&mut self) {
        let input = self.input();
        let Some(session) = self.session.as_mut() else {
            return;
        };

        match session.submit(&input, &mut self.engine) {
            AnswerResult::Correct(outcome) => {
                let puzzle = session.puzzle();
                let earned = if outcome.newly_completed {
                    format!("+{} moonstones", outcome.reward + outcome.bonus)
                } else {
                    String::from("already solved")
                };
                let logic = puzzle.explanation.logic_type;
                self.message = format!(
                    "*** {} ***  {}  [ Press ENTER ]\n\n{} {}\n\n{}",
                    puzzle.answer,
                    earned,
                    logic.display_name(),
                    "✦".repeat(logic.difficulty() as usize),
                    puzzle.explanation.breakdown
                );
                self.message_style = Style::default().fg(Color::Green);
                self.state = GameState::Solved;
                self.engine.set_current_puzzle(None);
            }
            AnswerResult::Wrong => {
                self.message = String::from("The stars dim. That is not the word.");
                self.message_style = Style::default().fg(Color::Red);
                self.editor = answer_editor();
            }
            AnswerResult::Incomplete => {
                self.message = format!(
                    "{} letters needed.",
                    session.open_slots()
                );
                self.message_style = Style::default().fg(Color::DarkGray);
            }
        }
    }

    fn use_hint(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.use_hint(&mut self.engine) {
            Ok(reveal) => {
                self.message = format!(
                    "HINT: {}  (letter {} is {})",
                    session.context_tag().unwrap_or_default(),
                    reveal.index + 1,
                    reveal.letter
                );
                self.message_style = Style::default().fg(Color::Cyan);
            }
            Err(e) => {
                self.message = e.to_string();
                self.message_style = Style::default().fg(Color::Magenta);
            }
        }
    }

    fn use_boost(&mut self) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        match session.use_boost(&mut self.engine) {
            Ok(index) => {
                self.message = format!("BOOST: slot {} glows. You still have to spell it.", index + 1);
                self.message_style = Style::default().fg(Color::Cyan);
            }
            Err(e) => {
                self.message = e.to_string();
                self.message_style = Style::default().fg(Color::Magenta);
            }
        }
    }

    /// Rewards are presented before unlocks.
    fn after_celebrations(&mut self) {
        if self.engine.pending_reward().is_some() {
            self.state = GameState::Reward;
        } else if self.engine.pending_unlock().is_some() {
            self.state = GameState::Unlock;
        } else {
            self.message.clear();
            self.state = GameState::ConstellationDetail;
        }
    }

    fn reset(&mut self) {
        self.engine.reset_progress();
        self.session = None;
        self.map_cursor = 0;
        self.puzzle_cursor = 0;
        self.state = GameState::TitleScreen;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("puzzlore.toml"));
    let config = Config::load(Path::new(&config_path))?;

    let catalog = Rc::new(Catalog::from_dir(&config.catalog_dir));
    if catalog.is_empty() {
        eprintln!("No constellations found in {:?}", config.catalog_dir);
        return Ok(());
    }

    let save_file = FileStore::new(&config.save_path);
    log::info!("progress is saved to {}", save_file.path().display());
    let store = ProgressStore::open(Box::new(save_file.clone()));
    let engine = ProgressionEngine::new(catalog, store, config.economy.clone());
    log::info!("Puzzlore starting with {} puzzles", engine.catalog().all_puzzles().len());

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(engine, save_file);

    loop {
        terminal.draw(|f| draw_ui(f, &app))?;

        let Event::Key(key) = event::read()? else {
            continue;
        };
        if key.kind != KeyEventKind::Press {
            continue;
        }

        match app.state {
            GameState::Onboarding => app.finish_onboarding(),
            GameState::TitleScreen => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    app.menu_selection = app.menu_selection.step(false);
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    app.menu_selection = app.menu_selection.step(true);
                }
                KeyCode::Enter => match app.menu_selection {
                    MenuOption::Continue => app.continue_game(),
                    MenuOption::StarMap => app.state = GameState::StarMap,
                    MenuOption::Spirits => app.state = GameState::Spirits,
                    MenuOption::Settings => {
                        app.settings_cursor = 0;
                        app.state = GameState::Settings;
                    }
                    MenuOption::Reset => app.state = GameState::ConfirmReset,
                    MenuOption::Quit => break,
                },
                KeyCode::Char('q') => break,
                _ => {}
            },
            GameState::StarMap => match key.code {
                KeyCode::Up | KeyCode::Char('k') => app.map_cursor = app.map_cursor.saturating_sub(1),
                KeyCode::Down | KeyCode::Char('j') => {
                    if app.map_cursor + 1 < app.constellations.len() {
                        app.map_cursor += 1;
                    }
                }
                KeyCode::Enter => app.open_constellation(),
                KeyCode::Esc | KeyCode::Char('q') => {
                    app.message.clear();
                    app.state = GameState::TitleScreen;
                }
                _ => {}
            },
            GameState::ConstellationDetail => {
                let count = app
                    .selected_constellation()
                    .map(|c| c.total_puzzles())
                    .unwrap_or(0);
                match key.code {
                    KeyCode::Up | KeyCode::Char('k') => {
                        app.puzzle_cursor = app.puzzle_cursor.saturating_sub(1)
                    }
                    KeyCode::Down | KeyCode::Char('j') => {
                        if app.puzzle_cursor + 1 < count {
                            app.puzzle_cursor += 1;
                        }
                    }
                    KeyCode::Enter => app.start_puzzle(),
                    KeyCode::Esc | KeyCode::Char('q') => app.state = GameState::StarMap,
                    _ => {}
                }
            }
            GameState::Playing => match key.code {
                KeyCode::Enter => app.submit_answer(),
                KeyCode::F(1) => app.use_hint(),
                KeyCode::F(2) => app.use_boost(),
                KeyCode::Esc => {
                    app.session = None;
                    app.engine.set_current_puzzle(None);
                    app.state = GameState::ConstellationDetail;
                }
                KeyCode::Char(c) if c.is_alphabetic() => {
                    app.editor.input(key);
                }
                KeyCode::Backspace | KeyCode::Left | KeyCode::Right => {
                    app.editor.input(key);
                }
                _ => {}
            },
            GameState::Solved => {
                if key.code == KeyCode::Enter {
                    app.session = None;
                    app.after_celebrations();
                }
            }
            GameState::Reward => {
                if key.code == KeyCode::Enter {
                    app.engine.clear_pending_reward();
                    app.after_celebrations();
                }
            }
            GameState::Unlock => {
                if key.code == KeyCode::Enter {
                    app.engine.clear_pending_unlock();
                    app.message.clear();
                    app.state = GameState::StarMap;
                }
            }
            GameState::Spirits => app.state = GameState::TitleScreen,
            GameState::Settings => match key.code {
                KeyCode::Up | KeyCode::Char('k') => {
                    app.settings_cursor = app.settings_cursor.saturating_sub(1)
                }
                KeyCode::Down | KeyCode::Char('j') => {
                    if app.settings_cursor < Preference::ALL.len() {
                        app.settings_cursor += 1;
                    }
                }
                KeyCode::Enter | KeyCode::Char(' ') => app.activate_setting(),
                KeyCode::Esc | KeyCode::Char('q') => app.state = GameState::TitleScreen,
                _ => {}
            },
            GameState::ConfirmReset => match key.code {
                KeyCode::Char('y') | KeyCode::Char('Y') => app.reset(),
                _ => app.state = GameState::TitleScreen,
            },
        }
    }

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;

    let progress = app.engine.progress();
    println!(
        "\nThe stars will wait. {} puzzles solved, {} moonstones, {} spirits.\n",
        progress.total_puzzles_solved,
        progress.currency,
        progress.unlocked_spirits.len()
    );

    Ok(())
}

fn draw_ui(f: &mut Frame, app: &App) {
    match app.state {
        GameState::Onboarding => return draw_onboarding(f),
        GameState::TitleScreen => return draw_title_screen(f, app),
        _ => {}
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(10),
            Constraint::Length(8),
        ])
        .split(f.area());

    draw_status_bar(f, app, chunks[0]);

    match app.state {
        GameState::StarMap => draw_star_map(f, app, chunks[1]),
        GameState::ConstellationDetail => draw_constellation(f, app, chunks[1]),
        GameState::Playing | GameState::Solved => draw_puzzle(f, app, chunks[1]),
        GameState::Reward => draw_reward(f, app, chunks[1]),
        GameState::Unlock => draw_unlock(f, app, chunks[1]),
        GameState::Spirits => draw_spirits(f, app, chunks[1]),
        GameState::Settings => draw_settings(f, app, chunks[1]),
        GameState::ConfirmReset => {
            let warning = Paragraph::new("Erase all progress, moonstones and spirits? [y/N]")
                .block(Block::default().borders(Borders::ALL).title(" Reset "))
                .style(Style::default().fg(Color::Red))
                .alignment(Alignment::Center);
            f.render_widget(warning, chunks[1]);
        }
        GameState::Onboarding | GameState::TitleScreen => {}
    }

    let (message_style, message_title) = match app.state {
        GameState::Solved => (
            Style::default().fg(Color::Black).bg(Color::Green),
            " SOLVED! ",
        ),
        _ => (app.message_style, " Whispers "),
    };
    let message = Paragraph::new(app.message.as_str())
        .block(Block::default().borders(Borders::ALL).title(message_title))
        .wrap(Wrap { trim: false })
        .style(message_style);
    f.render_widget(message, chunks[2]);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let progress = app.engine.progress();
    let status = Line::from(vec![
        Span::styled(
            " PUZZLORE ",
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Moonstones: {} ", progress.currency),
            Style::default().fg(Color::Cyan),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Solved: {} ", progress.total_puzzles_solved),
            Style::default().fg(Color::White).bg(Color::DarkGray),
        ),
        Span::raw("  "),
        Span::styled(
            format!(" Spirits: {} ", progress.unlocked_spirits.len()),
            Style::default().fg(Color::Magenta),
        ),
    ]);
    let status_block = Paragraph::new(status).block(Block::default().borders(Borders::BOTTOM));
    f.render_widget(status_block, area);
}

fn cursor_style(selected: bool) -> Style {
    if selected {
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

fn draw_star_map(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .constellations
        .iter()
        .enumerate()
        .map(|(i, constellation)| {
            let store = app.engine.store();
            let text = if store.is_constellation_unlocked(constellation) {
                let done = store.completed_puzzles_in(constellation);
                let mark = if done >= constellation.total_puzzles() {
                    "★"
                } else if store.is_constellation_complete(constellation) {
                    "✦"
                } else {
                    "·"
                };
                format!(
                    " {} {:>2}. {:<24} {:>2}/{:<2} (opens next at {}) ",
                    mark,
                    constellation.order,
                    constellation.name,
                    done,
                    constellation.total_puzzles(),
                    constellation.unlock_threshold
                )
            } else {
                format!(" 🔒 {:>2}. {:<24} ", constellation.order, "???")
            };
            Line::from(Span::styled(text, cursor_style(i == app.map_cursor)))
        })
        .collect();

    let map = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Star Map [Enter: Open | Esc: Back] "),
    );
    f.render_widget(map, area);
}

fn draw_constellation(f: &mut Frame, app: &App, area: Rect) {
    let Some(constellation) = app.selected_constellation() else {
        return;
    };
    let progress = app.engine.progress();
    let lines: Vec<Line> = constellation
        .puzzles
        .iter()
        .enumerate()
        .map(|(i, puzzle)| {
            let mark = if progress.is_puzzle_completed(&puzzle.id) {
                "★"
            } else {
                "☆"
            };
            let stars = "✦".repeat(puzzle.difficulty.clamp(1, 3) as usize);
            Line::from(Span::styled(
                format!(" {} Star {:>2}  {:<3} +{} ", mark, i + 1, stars, puzzle.moonstone_reward()),
                cursor_style(i == app.puzzle_cursor),
            ))
        })
        .collect();

    let title = format!(
        " {} - {}/{} [Enter: Play | Esc: Map] ",
        constellation.name,
        progress.completed_puzzles_in(&constellation),
        constellation.total_puzzles()
    );
    let list = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(list, area);
}

fn draw_puzzle(f: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let puzzle = session.puzzle();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(3)])
        .split(area);

    let input = app.input();
    let slots: Vec<Span> = session
        .slots(&input)
        .into_iter()
        .enumerate()
        .map(|(i, slot)| {
            let prefilled = session.anchor_letters().contains_key(&i)
                || session.revealed_indices().contains(&i);
            let style = if prefilled {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else if session.boost_index() == Some(i) {
                Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };
            let letter = match slot {
                Some(c) => c.to_ascii_uppercase(),
                None if session.boost_index() == Some(i) => {
                    puzzle.answer.chars().nth(i).unwrap_or('_').to_ascii_lowercase()
                }
                None => '_',
            };
            Span::styled(format!(" {} ", letter), style)
        })
        .collect();

    let constellation_background = app
        .selected_constellation()
        .map(|c| app.engine.catalog().effective_background(puzzle, &c).to_string())
        .unwrap_or_default();

    let lines = vec![
        Line::from(Span::styled(
            format!("[ {} ]", puzzle.puzzle_image),
            Style::default().fg(Color::Magenta),
        )),
        Line::from(Span::styled(
            format!("under the {} sky", constellation_background),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(""),
        Line::from(slots),
        Line::from(""),
        Line::from(Span::styled(
            puzzle.wheel_letters().join("  "),
            Style::default().fg(Color::Cyan),
        )),
    ];

    let board = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" The Sky "))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(board, rows[0]);
    f.render_widget(&app.editor, rows[1]);
}

fn draw_reward(f: &mut Frame, app: &App, area: Rect) {
    let Some(constellation) = app.engine.pending_reward() else {
        return;
    };
    let Some(spirit) = constellation.spirit_reward.as_ref() else {
        return;
    };
    let (r, g, b) = spirit.rarity.color();
    let text = vec![
        Line::from(format!("{} is complete.", constellation.name)),
        Line::from(""),
        Line::from(Span::styled(
            format!("✧ {} ✧", spirit.name),
            Style::default().fg(Color::Rgb(r, g, b)).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            spirit.rarity.display_name(),
            Style::default().fg(Color::Rgb(r, g, b)),
        )),
        Line::from(""),
        Line::from(spirit.lore.as_str()),
        Line::from(""),
        Line::from("[ Press ENTER ]"),
    ];
    let reward = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" A Spirit Awakens "))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(reward, area);
}

fn draw_unlock(f: &mut Frame, app: &App, area: Rect) {
    let Some(constellation) = app.engine.pending_unlock() else {
        return;
    };
    let next = app
        .engine
        .catalog()
        .constellation_at_order(constellation.order + 1);
    let headline = match next {
        Some(next) => format!("{} has appeared in the sky!", next.name),
        None => String::from("You have charted every constellation... for now."),
    };
    let text = vec![
        Line::from(format!("{} shines bright.", constellation.name)),
        Line::from(""),
        Line::from(Span::styled(
            headline,
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(format!("+{} moonstones", app.engine.economy().constellation_bonus)),
        Line::from(""),
        Line::from("[ Press ENTER ]"),
    ];
    let unlock = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(" New Constellation "))
        .alignment(Alignment::Center);
    f.render_widget(unlock, area);
}

fn draw_spirits(f: &mut Frame, app: &App, area: Rect) {
    let lines: Vec<Line> = app
        .constellations
        .iter()
        .filter_map(|c| c.spirit_reward.as_ref().map(|s| (c, s)))
        .map(|(constellation, spirit)| {
            if app.engine.store().is_spirit_unlocked(&spirit.id) {
                let (r, g, b) = spirit.rarity.color();
                Line::from(vec![
                    Span::styled(
                        format!(" {:<20}", spirit.name),
                        Style::default().fg(Color::Rgb(r, g, b)),
                    ),
                    Span::raw(format!(" {:<10} ", spirit.rarity.display_name())),
                    Span::styled(spirit.lore.as_str(), Style::default().fg(Color::Gray)),
                ])
            } else {
                Line::from(Span::styled(
                    format!(" ??? (complete {})", constellation.name),
                    Style::default().fg(Color::DarkGray),
                ))
            }
        })
        .collect();

    let spirits = Paragraph::new(lines)
        .block(Block::default().borders(Borders::ALL).title(" Spirit Collection "))
        .wrap(Wrap { trim: false });
    f.render_widget(spirits, area);
}

fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let mut lines: Vec<Line> = Preference::ALL
        .iter()
        .enumerate()
        .map(|(i, preference)| {
            let state = if app.settings.is_enabled(*preference) { "[x]" } else { "[ ]" };
            Line::from(Span::styled(
                format!(" {} {:<20} ", state, preference.label()),
                cursor_style(i == app.settings_cursor),
            ))
        })
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "     Replay introduction ",
        cursor_style(app.settings_cursor == Preference::ALL.len()),
    )));

    let settings = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Settings [Enter: Toggle | Esc: Back] "),
    );
    f.render_widget(settings, area);
}

fn draw_onboarding(f: &mut Frame) {
    let text = vec![
        Line::from(Span::styled(
            "Welcome, Stargazer",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from("Each star hides a picture puzzle. Spell its answer with the letter wheel."),
        Line::from("Gold letters are already in place. Type the rest and press ENTER."),
        Line::from("Solve enough stars to reveal the next constellation."),
        Line::from("Solve them all to awaken the constellation's spirit."),
        Line::from(""),
        Line::from("Moonstones buy hints (F1) and boosts (F2)."),
        Line::from(""),
        Line::from("[ Press any key ]"),
    ];
    let onboarding = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: false });
    f.render_widget(onboarding, f.area());
}

fn draw_title_screen(f: &mut Frame, app: &App) {
    let area = f.area();

    let title_art = r#"
    ✦        ·            ★                ·        ✦
         ___  _   _ ___ ___ _    ___  ___ ___
        | _ \| | | |_  /_  / |  / _ \| _ \ __|
        |  _/| |_| |/ / / /| |_| (_) |   / _|
        |_|   \___//___/___|____\___/|_|_\___|
    ·          ✦           ·           ★          ·
              "Read the sky. Spell the stars."
"#;

    let mut constraints = vec![Constraint::Length(10)];
    constraints.extend(MenuOption::ALL.iter().map(|_| Constraint::Length(2)));
    constraints.push(Constraint::Min(1));

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(area);

    let title = Paragraph::new(title_art)
        .style(Style::default().fg(Color::Yellow))
        .alignment(Alignment::Center);
    f.render_widget(title, chunks[0]);

    for (i, option) in MenuOption::ALL.iter().enumerate() {
        let item = Paragraph::new(option.label())
            .style(cursor_style(*option == app.menu_selection))
            .alignment(Alignment::Center);
        f.render_widget(item, chunks[i + 1]);
    }

    let help = Paragraph::new("↑/↓ to select  •  ENTER to confirm  •  q to quit")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    f.render_widget(help, chunks[MenuOption::ALL.len() + 1]);
}
