use crate::utils::*;
use clap::Args;
use gloo::timers::callback::Interval;
use numtap_core as game;
use std::collections::BTreeMap;
use web_sys::HtmlInputElement;
use yew::html::Scope;
use yew::prelude::*;

pub trait HasUpdate {
    fn has_update(self) -> bool;
}

impl<E> HasUpdate for Result<game::ClickOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::ClickOutcome| outcome.has_update())
    }
}

impl<E> HasUpdate for Result<game::TickOutcome, E> {
    fn has_update(self) -> bool {
        self.map_or(false, |outcome: game::TickOutcome| outcome.has_update())
    }
}

/// Browser timers of the current round, dropping an `Interval` cancels it.
#[derive(Debug, Default)]
struct RoundTimers {
    armed: BTreeMap<game::TimerKey, Interval>,
}

impl RoundTimers {
    fn sync(&mut self, round: &game::Round, link: &Scope<GameView>) {
        let wanted: BTreeMap<game::TimerKey, u32> = round
            .active_timers()
            .map(|spec| (spec.key, spec.period_ms))
            .collect();

        self.armed.retain(|key, _| wanted.contains_key(key));
        for (key, period_ms) in wanted {
            self.armed.entry(key).or_insert_with(|| {
                log::trace!("arm timer {:?} every {}ms", key, period_ms);
                let link = link.clone();
                Interval::new(period_ms, move || link.send_message(Msg::Timer(key)))
            });
        }
    }
}

fn status_banner(state: game::RoundState) -> (&'static str, &'static str) {
    use game::RoundState::*;
    match state {
        Idle | Playing => ("LET'S PLAY", "black"),
        GameOver => ("Game Over", "red"),
        AllCleared => ("ALL CLEARED", "green"),
    }
}

/// The button names what it will do, not the current mode.
fn auto_play_label(enabled: bool) -> &'static str {
    if enabled {
        "Auto Play OFF"
    } else {
        "Auto Play ON"
    }
}

fn tint_color(tint: game::FadeTint) -> &'static str {
    match tint {
        game::FadeTint::Selected => "orange",
        game::FadeTint::Faded => "rgba(255, 165, 0, 0.5)",
    }
}

fn tile_style(tile: &game::Tile) -> String {
    let position = tile.position();
    // a finished fade drops its tint, which only shows once game over pins it visible again
    let background = match tile.fade() {
        Some(fade) if !fade.is_finished() => tint_color(fade.tint()),
        _ => "white",
    };
    format!(
        "position: absolute; top: {}px; left: {}px; width: {}px; height: {}px; background-color: {}; \
         opacity: {}; z-index: {}; transition: opacity 0.1s linear, background-color 0.1s linear;",
        position.top,
        position.left,
        game::TILE_SIZE,
        game::TILE_SIZE,
        background,
        tile.opacity(),
        tile.stack_order(),
    )
}

fn board_style() -> String {
    format!(
        "position: relative; width: {}px; height: {}px;",
        game::BOARD_SIZE,
        game::BOARD_SIZE
    )
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Msg {
    Play,
    Restart,
    ToggleAutoPlay,
    SetPoints(String),
    TileClick(game::TileId),
    Timer(game::TimerKey),
}

#[derive(Properties, Clone, PartialEq)]
struct TileProps {
    tile: game::Tile,
    callback: Callback<game::TileId>,
}

#[function_component(TileView)]
fn tile_component(props: &TileProps) -> Html {
    let TileProps { tile, callback } = props.clone();
    let id = tile.id();
    let style = tile_style(&tile);
    let class = classes!(
        "number",
        tile.fade().map(|fade| match fade.tint() {
            game::FadeTint::Selected => "selected",
            game::FadeTint::Faded => "faded",
        })
    );

    let onclick = Callback::from(move |_: MouseEvent| {
        log::trace!("tile {} clicked", id);
        callback.emit(id);
    });

    html! {
        <div {class} {style} {onclick}>
            <span>{id.to_string()}</span>
            if let Some(fade) = tile.fade() {
                <span class="countdown">{format!("{:.1}s", fade.countdown_secs())}</span>
            }
        </div>
    }
}

#[derive(Args, Properties, Debug, Clone, PartialEq)]
pub(crate) struct GameProps {
    /// Force a layout seed instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Number of tiles on the board
    #[arg(short, long, default_value_t = game::GameConfig::DEFAULT_POINT_COUNT)]
    points: u32,

    /// Milliseconds between auto-play clicks
    #[arg(short, long, default_value_t = game::GameConfig::DEFAULT_CLICK_INTERVAL_MS)]
    interval: u32,

    /// Start with auto-play enabled
    #[arg(short, long)]
    autoplay: bool,
}

#[derive(Debug)]
pub(crate) struct GameView {
    points_input: String,
    round: game::Round,
    timers: RoundTimers,
}

impl GameView {
    fn new_config(&self, props: &GameProps) -> game::GameConfig {
        game::GameConfig::new(parse_point_count(&self.points_input), props.interval)
    }

    fn start_round(&mut self, ctx: &Context<Self>) {
        use game::LayoutGenerator;

        let props = ctx.props();
        let config = self.new_config(props);
        let seed = props.seed.unwrap_or_else(js_random_seed);
        let auto_play = match self.round.state() {
            game::RoundState::Idle => props.autoplay,
            _ => self.round.auto_play(),
        };
        log::debug!("new round, points: {}, seed: {}", config.point_count, seed);

        let layout = game::RandomLayoutGenerator::new(seed).generate(config.point_count);
        // cancels every timer of the previous round
        self.timers = RoundTimers::default();
        self.round = game::Round::start(config, layout, auto_play);
    }
}

impl Component for GameView {
    type Message = Msg;
    type Properties = GameProps;

    fn create(ctx: &Context<Self>) -> Self {
        let props = ctx.props();
        let points_input = props.points.to_string();
        let config = game::GameConfig::new(parse_point_count(&points_input), props.interval);
        Self {
            points_input,
            round: game::Round::idle(config),
            timers: RoundTimers::default(),
        }
    }

    fn update(&mut self, ctx: &Context<Self>, msg: Self::Message) -> bool {
        use Msg::*;

        let updated = match msg {
            Play | Restart => {
                self.start_round(ctx);
                true
            }
            ToggleAutoPlay => match self.round.toggle_auto_play() {
                Ok(enabled) => {
                    log::debug!("auto-play: {}", enabled);
                    true
                }
                Err(err) => {
                    log::debug!("auto-play toggle ignored: {}", err);
                    false
                }
            },
            SetPoints(value) => {
                if self.points_input != value {
                    self.points_input = value;
                    true
                } else {
                    false
                }
            }
            TileClick(id) => {
                log::debug!("click tile: {}", id);
                self.round.click(id).has_update()
            }
            Timer(key) => self.round.fire(key).has_update(),
        };

        self.timers.sync(&self.round, ctx.link());
        updated
    }

    fn view(&self, ctx: &Context<Self>) -> Html {
        use Msg::*;

        let state = self.round.state();
        let (status, status_color) = status_banner(state);
        let is_playing = state.is_playing();
        let elapsed_time = format!("Time: {:.1}s", self.round.elapsed_secs());

        let oninput = ctx.link().callback(|e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            SetPoints(input.value())
        });
        let cb_play = ctx.link().callback(|_: MouseEvent| Play);
        let cb_restart = ctx.link().callback(|_: MouseEvent| Restart);
        let cb_auto_play = ctx.link().callback(|_: MouseEvent| ToggleAutoPlay);
        let cb_tile = ctx.link().callback(TileClick);

        html! {
            <div class="container">
                <h3 style={format!("color: {}", status_color)}>{status}</h3>
                <div>
                    <label>{"Points: "}</label>
                    <input type="number" value={self.points_input.clone()} {oninput}/>
                </div>
                <p>{elapsed_time}</p>
                if matches!(state, game::RoundState::Idle) {
                    <button onclick={cb_play}>{"Play"}</button>
                } else {
                    <button onclick={cb_restart}>{"Restart"}</button>
                }
                if is_playing {
                    <button onclick={cb_auto_play}>{auto_play_label(self.round.auto_play())}</button>
                }
                <div class="number-area" style={board_style()}>
                    {
                        for self.round.tiles().iter().map(|&tile| html! {
                            <TileView key={tile.id()} {tile} callback={cb_tile.clone()}/>
                        })
                    }
                </div>
                if is_playing {
                    <label>{format!("Next: {}", self.round.expected())}</label>
                }
            </div>
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use game::LayoutGenerator;

    fn round(point_count: u32) -> game::Round {
        let layout = game::RandomLayoutGenerator::new(1).generate(point_count);
        game::Round::start(game::GameConfig::default(), layout, false)
    }

    #[test]
    fn banner_follows_round_state() {
        assert_eq!(status_banner(game::RoundState::Idle).0, "LET'S PLAY");
        assert_eq!(status_banner(game::RoundState::Playing).0, "LET'S PLAY");
        assert_eq!(status_banner(game::RoundState::GameOver), ("Game Over", "red"));
        assert_eq!(
            status_banner(game::RoundState::AllCleared),
            ("ALL CLEARED", "green")
        );
    }

    #[test]
    fn auto_play_button_names_the_action() {
        assert_eq!(auto_play_label(false), "Auto Play ON");
        assert_eq!(auto_play_label(true), "Auto Play OFF");
    }

    #[test]
    fn rejected_moves_do_not_rerender() {
        let mut round = round(3);

        assert!(!round.click(0).has_update());
        assert!(round.click(1).has_update());
        assert!(!round.fire(game::TimerKey::AutoPlay { next: 1 }).has_update());
        assert!(round.fire(game::TimerKey::Fade(1)).has_update());
    }

    #[test]
    fn clicked_tile_is_drawn_on_top_in_orange() {
        let mut round = round(2);
        round.click(1).unwrap();

        let style = tile_style(round.tile(1).unwrap());
        assert!(style.contains("background-color: orange;"));
        assert!(style.contains("z-index: 2;"));
        assert!(style.contains("width: 50px; height: 50px;"));
        assert!(tile_style(round.tile(2).unwrap()).contains("background-color: white;"));
        assert_eq!(board_style(), "position: relative; width: 500px; height: 500px;");
    }

    #[test]
    fn faded_tile_pinned_by_game_over_loses_its_tint() {
        let mut round = round(2);
        round.click(1).unwrap();
        for _ in 0..game::FADE_TICKS {
            round.fire(game::TimerKey::Fade(1)).unwrap();
        }
        assert_eq!(round.click(1).unwrap(), game::ClickOutcome::Mistake);

        let style = tile_style(round.tile(1).unwrap());
        assert!(style.contains("background-color: white;"));
        assert!(style.contains("opacity: 1;"));
    }
}
