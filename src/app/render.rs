//! Drawing. A [`View`] is captured from the game at the render cadence and
//! every frame draws from the latest one plus the [`Hud`].

use ratzilla::ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratzilla::ratatui::style::{Color, Modifier, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Borders, Paragraph, Wrap};
use ratzilla::ratatui::Frame;

use hero_clicker::economy::{EntityId, HeroKind, UpgradeEffect, UpgradeKind};
use hero_clicker::encounter::EncounterKind;
use hero_clicker::format::{format_compact, format_duration, format_number};
use hero_clicker::skills::SkillKind;
use hero_clicker::Game;

use super::actions::*;
use super::hud::Hud;
use super::{App, Tab};
use crate::input::{is_narrow_layout, ClickState};
use crate::widgets::{ClickableList, TabBar};

// ── Snapshot ───────────────────────────────────────────────────

pub struct ShopRow {
    pub name: &'static str,
    pub count: u32,
    pub rank: u32,
    pub cost: f64,
    pub affordable: bool,
    pub locked_until: Option<u32>,
    pub can_ascend: bool,
    pub detail: String,
}

pub struct MissionRow {
    pub description: &'static str,
    pub progress: u64,
    pub target: u64,
    pub reward: f64,
    pub complete: bool,
}

pub struct View {
    pub premium: f64,
    pub run_total: f64,
    pub prestige_gain: f64,
    pub total_clicks: u64,
    pub kills: u64,
    pub bosses: u64,
    pub best_combo: u32,
    pub boss_time: Option<f64>,
    pub special: Option<&'static str>,
    pub weak_point: bool,
    pub drone: bool,
    pub heroes: Vec<ShopRow>,
    pub upgrades: Vec<ShopRow>,
    pub missions: Vec<MissionRow>,
    pub achievements: Vec<(&'static str, bool)>,
    pub artifacts: Vec<(&'static str, &'static str, bool)>,
    pub has_store: bool,
}

impl View {
    pub fn capture(game: &Game) -> Self {
        let world = &game.world;
        let player = &world.player;
        let economy = &world.economy;
        let threshold = game.tuning.ascension_threshold;

        let heroes = HeroKind::all()
            .iter()
            .map(|kind| {
                let hero = economy.hero(*kind);
                let cost = game.next_cost(EntityId::Hero(*kind));
                let locked = economy.is_locked(*kind, player.level);
                ShopRow {
                    name: kind.name(),
                    count: hero.count,
                    rank: hero.rank,
                    cost,
                    affordable: !locked && player.currency >= cost,
                    locked_until: locked.then_some(kind.unlock_level()),
                    can_ascend: hero.count >= threshold,
                    detail: format!("{} dps each", format_compact(hero.current_effect)),
                }
            })
            .collect();

        let upgrades = UpgradeKind::all()
            .iter()
            .map(|kind| {
                let upgrade = economy.upgrade(*kind);
                let cost = game.next_cost(EntityId::Upgrade(*kind));
                let detail = match kind.effect() {
                    UpgradeEffect::ClickBonus(_) => format!("+{} click", format_compact(upgrade.current_effect)),
                    UpgradeEffect::Synergy { tag, multiplier } => format!("{:?} heroes x{}", tag, multiplier),
                };
                ShopRow {
                    name: kind.name(),
                    count: upgrade.count,
                    rank: 0,
                    cost,
                    affordable: player.currency >= cost,
                    locked_until: None,
                    can_ascend: false,
                    detail,
                }
            })
            .collect();

        let missions = world
            .progression
            .missions
            .active
            .iter()
            .map(|m| MissionRow {
                description: m.def.description,
                progress: m.progress,
                target: m.def.target,
                reward: m.def.reward_premium,
                complete: m.is_complete(),
            })
            .collect();

        let encounter = &game.encounter;
        let special = match encounter.kind {
            EncounterKind::Special(kind) => Some(kind.name()),
            _ => None,
        };

        View {
            premium: player.premium_currency,
            run_total: player.run_total_earned,
            prestige_gain: game.prestige_gain(),
            total_clicks: player.total_clicks,
            kills: player.total_villains_defeated,
            bosses: player.total_bosses_defeated,
            best_combo: player.best_combo,
            boss_time: encounter.is_boss().then_some(encounter.boss_time_remaining),
            special,
            weak_point: game.weak_point_live(),
            drone: game.drone_live(),
            heroes,
            upgrades,
            missions,
            achievements: world
                .progression
                .achievements
                .iter()
                .map(|a| (a.def.name, a.done))
                .collect(),
            artifacts: hero_clicker::economy::ArtifactKind::all()
                .iter()
                .map(|k| (k.name(), k.effect_description(), economy.artifacts.owns(*k)))
                .collect(),
            has_store: game.has_store(),
        }
    }
}

// ── Layout ─────────────────────────────────────────────────────

pub fn render(view: &View, hud: &Hud, app: &App, f: &mut Frame, cs: &mut ClickState) {
    let area = f.area();
    cs.terminal_cols = area.width;
    cs.terminal_rows = area.height;
    cs.clear_targets();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(10)])
        .split(area);
    render_status(view, hud, f, rows[0]);

    if is_narrow_layout(area.width) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(9),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(5),
            ])
            .split(rows[1]);
        render_encounter(view, hud, f, chunks[0], cs);
        render_skills(hud, f, chunks[1], cs);
        render_tabs(view, app, f, chunks[2], cs);
        render_tab_content(view, hud, app, f, chunks[3], cs);
        render_log(hud, f, chunks[4]);
    } else {
        let cols = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(rows[1]);
        let left = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(9), Constraint::Length(3), Constraint::Min(4)])
            .split(cols[0]);
        let right = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(6)])
            .split(cols[1]);
        render_encounter(view, hud, f, left[0], cs);
        render_skills(hud, f, left[1], cs);
        render_log(hud, f, left[2]);
        render_tabs(view, app, f, right[0], cs);
        render_tab_content(view, hud, app, f, right[1], cs);
    }
}

fn render_status(view: &View, hud: &Hud, f: &mut Frame, area: Rect) {
    let accent = if hud.fanfare > 0 { Color::Yellow } else { Color::Cyan };
    let line = Line::from(vec![
        Span::styled("HERO CLICKER ", Style::default().fg(accent).add_modifier(Modifier::BOLD)),
        Span::styled(format!(" Lv {} ", hud.level), Style::default().fg(Color::White)),
        Span::styled(format!(" $ {} ", format_number(hud.currency)), Style::default().fg(Color::Yellow)),
        Span::styled(format!(" ◆ {} ", format_number(view.premium)), Style::default().fg(Color::Magenta)),
        Span::styled(format!(" DPS {} ", format_compact(hud.dps)), Style::default().fg(Color::Green)),
    ]);
    let widget = Paragraph::new(line)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .alignment(Alignment::Center);
    f.render_widget(widget, area);
}

/// `width` cells of filled and empty blocks.
fn health_bar(fraction: f64, width: usize) -> String {
    let fraction = if fraction.is_finite() { fraction.clamp(0.0, 1.0) } else { 0.0 };
    let filled = ((fraction * width as f64).round() as usize).min(width);
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

fn render_encounter(view: &View, hud: &Hud, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let border = if hud.is_boss {
        Color::Red
    } else if view.special.is_some() {
        Color::Magenta
    } else {
        Color::Green
    };
    let fraction = if hud.max_health > 0.0 { hud.health / hud.max_health } else { 0.0 };
    let bar_width = area.width.saturating_sub(4) as usize;

    let mut cl = ClickableList::new();
    let mut title = vec![Span::styled(
        hud.encounter.clone(),
        Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
    )];
    if let Some(secs) = view.boss_time {
        title.push(Span::styled(format!("  ⏱ {:.0}s", secs.max(0.0)), Style::default().fg(Color::Red)));
    }
    cl.push(Line::from(title));
    cl.push(Line::from(Span::styled(health_bar(fraction, bar_width), Style::default().fg(border))));
    cl.push(Line::from(format!(
        "{} / {}",
        format_number(hud.health),
        format_number(hud.max_health)
    )));
    cl.push(Line::from(if hud.combo_count > 1 {
        format!("Combo x{}  ({:.2}x)", hud.combo_count, hud.combo_multiplier)
    } else {
        String::new()
    }));

    let attack_style = if hud.crit_flash {
        Style::default().fg(Color::Black).bg(Color::Red).add_modifier(Modifier::BOLD)
    } else if hud.flash > 0 {
        Style::default().fg(Color::Black).bg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    };
    cl.push_clickable(Line::from(Span::styled(" [SPACE] ATTACK ", attack_style)), ATTACK);
    if view.weak_point {
        cl.push_clickable(
            Line::from(Span::styled(" [W] Weak point! ", Style::default().fg(Color::Red).add_modifier(Modifier::BOLD))),
            STRIKE_WEAK_POINT,
        );
    }
    if view.drone {
        cl.push_clickable(
            Line::from(Span::styled(" [D] Catch the drone ", Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD))),
            CATCH_DRONE,
        );
    }

    cl.register_targets(area, cs, 1, 1);
    let title = match view.special {
        Some(name) => format!(" Villain · {} ", name),
        None if hud.is_boss => " BOSS ".to_string(),
        None => " Villain ".to_string(),
    };
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn render_skills(hud: &Hud, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let keys = ['Q', 'E', 'R'];
    let mut bar = TabBar::new(" ");
    for (i, kind) in SkillKind::all().iter().enumerate() {
        let lamp = hud.skill(*kind);
        let (label, style) = if lamp.active {
            (
                format!("[{}] {} ON", keys[i], kind.name()),
                Style::default().fg(Color::Black).bg(Color::Green).add_modifier(Modifier::BOLD),
            )
        } else if lamp.cooldown > 0.0 {
            (
                format!("[{}] {} {:.0}s", keys[i], kind.name(), lamp.cooldown.ceil()),
                Style::default().fg(Color::DarkGray),
            )
        } else {
            (format!("[{}] {}", keys[i], kind.name()), Style::default().fg(Color::Green))
        };
        bar = bar.tab(label, style, SKILL_BASE + i as u16);
    }
    bar.block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(" Skills "),
    )
    .render(f, area, cs);
}

fn render_tabs(view: &View, app: &App, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let style = |tab: Tab| {
        if app.tab == tab {
            Style::default().fg(Color::Black).bg(Color::Cyan).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Cyan)
        }
    };
    let ready = view.missions.iter().filter(|m| m.complete).count();
    let missions = if ready > 0 {
        format!("Missions ({})", ready)
    } else {
        "Missions".to_string()
    };
    TabBar::new("│")
        .tab("Heroes", style(Tab::Heroes), TAB_HEROES)
        .tab("Upgrades", style(Tab::Upgrades), TAB_UPGRADES)
        .tab(missions, style(Tab::Missions), TAB_MISSIONS)
        .tab("Stats", style(Tab::Stats), TAB_STATS)
        .block(Block::default().borders(Borders::ALL).border_style(Style::default().fg(Color::DarkGray)))
        .render(f, area, cs);
}

fn render_tab_content(view: &View, hud: &Hud, app: &App, f: &mut Frame, area: Rect, cs: &mut ClickState) {
    let mut cl = ClickableList::new();
    let title = match app.tab {
        Tab::Heroes => {
            shop_lines(&mut cl, &view.heroes, BUY_HERO_BASE, Some(ASCEND_HERO_BASE));
            " Heroes [1-6] buy, [Shift+n] ascend "
        }
        Tab::Upgrades => {
            shop_lines(&mut cl, &view.upgrades, BUY_UPGRADE_BASE, None);
            " Upgrades [1-6] "
        }
        Tab::Missions => {
            mission_lines(&mut cl, view);
            " Daily missions "
        }
        Tab::Stats => {
            stats_lines(&mut cl, view, hud, app);
            " Stats "
        }
    };
    cl.register_targets(area, cs, 1, 1);
    let widget = Paragraph::new(cl.into_lines()).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue))
            .title(title),
    );
    f.render_widget(widget, area);
}

fn shop_lines(cl: &mut ClickableList<'_>, rows: &[ShopRow], buy_base: u16, ascend_base: Option<u16>) {
    for (i, row) in rows.iter().enumerate() {
        let key = Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD));
        if let Some(level) = row.locked_until {
            cl.push_clickable(
                Line::from(vec![
                    key,
                    Span::styled(format!("{} (unlocks at Lv {})", row.name, level), Style::default().fg(Color::DarkGray)),
                ]),
                buy_base + i as u16,
            );
            continue;
        }
        let name_style = if row.affordable {
            Style::default().fg(Color::White)
        } else {
            Style::default().fg(Color::DarkGray)
        };
        let rank = if row.rank > 0 { format!(" ★{}", row.rank) } else { String::new() };
        cl.push_clickable(
            Line::from(vec![
                key,
                Span::styled(format!("{}{} x{}", row.name, rank, row.count), name_style),
                Span::styled(format!("  ${}", format_compact(row.cost)), Style::default().fg(Color::Yellow)),
                Span::styled(format!("  {}", row.detail), Style::default().fg(Color::Gray)),
            ]),
            buy_base + i as u16,
        );
        if let Some(base) = ascend_base.filter(|_| row.can_ascend) {
            cl.push_clickable(
                Line::from(Span::styled(
                    format!("     ↑ Ascend {} (resets count, x10 power)", row.name),
                    Style::default().fg(Color::Magenta),
                )),
                base + i as u16,
            );
        }
    }
}

fn mission_lines(cl: &mut ClickableList<'_>, view: &View) {
    if view.missions.is_empty() {
        cl.push(Line::from(Span::styled("All done for today.", Style::default().fg(Color::DarkGray))));
        return;
    }
    for (i, m) in view.missions.iter().enumerate() {
        let style = if m.complete {
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        cl.push_clickable(
            Line::from(vec![
                Span::styled(format!(" [{}] ", i + 1), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{} {}/{}", m.description, m.progress, m.target), style),
                Span::styled(format!("  ◆{}", format_number(m.reward)), Style::default().fg(Color::Magenta)),
            ]),
            CLAIM_MISSION_BASE + i as u16,
        );
    }
    if view.missions.iter().any(|m| m.complete) {
        cl.push_clickable(
            Line::from(Span::styled(" [A] Claim all (+5 bonus) ", Style::default().fg(Color::Green))),
            CLAIM_ALL_MISSIONS,
        );
    }
}

fn stats_lines(cl: &mut ClickableList<'_>, view: &View, hud: &Hud, app: &App) {
    let gray = Style::default().fg(Color::Gray);
    cl.push(Line::from(Span::styled(format!("Clicks: {}", format_number(view.total_clicks as f64)), gray)));
    cl.push(Line::from(Span::styled(format!("Villains defeated: {}", format_number(view.kills as f64)), gray)));
    cl.push(Line::from(Span::styled(format!("Bosses defeated: {}", view.bosses), gray)));
    cl.push(Line::from(Span::styled(format!("Best combo: {}", view.best_combo), gray)));
    cl.push(Line::from(Span::styled(format!("Earned this run: {}", format_number(view.run_total)), gray)));
    for (name, done) in &view.achievements {
        let mark = if *done { "✔" } else { "·" };
        cl.push(Line::from(Span::styled(format!("{} {}", mark, name), gray)));
    }
    for (name, effect, owned) in &view.artifacts {
        if *owned {
            cl.push(Line::from(Span::styled(format!("◈ {}: {}", name, effect), Style::default().fg(Color::Magenta))));
        }
    }
    let prestige_style = if view.prestige_gain >= 1.0 {
        Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    cl.push_clickable(
        Line::from(Span::styled(
            format!(" [P] Prestige for +{} crystals ", format_number(view.prestige_gain)),
            prestige_style,
        )),
        PRESTIGE,
    );
    let save_label = if view.has_store { " [S] Save now " } else { " [S] Save (storage unavailable) " };
    cl.push_clickable(Line::from(Span::styled(save_label, Style::default().fg(Color::Cyan))), SAVE);
    let reset_label = if app.confirm_reset { " [X] Press again to erase everything " } else { " [X] Reset save " };
    cl.push_clickable(Line::from(Span::styled(reset_label, Style::default().fg(Color::Red))), RESET);
    if hud.dps > 0.0 {
        let eta = if hud.max_health > 0.0 { hud.health / hud.dps } else { 0.0 };
        cl.push(Line::from(Span::styled(format!("Passive kill time: {}", format_duration(eta)), gray)));
    }
}

fn render_log(hud: &Hud, f: &mut Frame, area: Rect) {
    let visible = area.height.saturating_sub(2) as usize;
    let skip = hud.log.len().saturating_sub(visible);
    let lines: Vec<Line> = hud
        .log
        .iter()
        .skip(skip)
        .map(|entry| {
            let style = if entry.is_important {
                Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::Gray)
            };
            Line::from(Span::styled(entry.text.clone(), style))
        })
        .collect();
    let widget = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue))
                .title(" Log "),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(widget, area);
}
