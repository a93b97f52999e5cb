//! A subset of the xboard/CECP protocol: enough for a GUI to play a game
//! against the engine (`new`, `force`, side selection, per-move or
//! per-session time controls, `go`, `undo`/`remove`, `post`) without
//! pondering, analyze mode, or edit mode.

use crate::board::{parse_move, Board, Color, MoveArena};
use crate::engine::Engine;

pub struct XboardHandler {
    pub engine: Engine,
    force_mode: bool,
    engine_color: Option<Color>,
    post: bool,
    time_per_move_cs: Option<i64>,
    engine_time_cs: i64,
}

pub enum XboardOutcome {
    Continue,
    Quit,
}

impl XboardHandler {
    #[must_use]
    pub fn new(engine: Engine) -> Self {
        XboardHandler {
            engine,
            force_mode: false,
            engine_color: None,
            post: false,
            time_per_move_cs: None,
            engine_time_cs: 6_000,
        }
    }

    /// Processes one line of xboard input, writing any protocol response to
    /// `out`. Returns `XboardOutcome::Quit` once the session should end.
    pub fn handle_line(&mut self, line: &str, out: &mut dyn std::io::Write) -> XboardOutcome {
        let line = line.trim();
        if line.is_empty() {
            return XboardOutcome::Continue;
        }
        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let rest: Vec<&str> = parts.collect();

        match command {
            "xboard" => {}
            "protover" => {
                let _ = writeln!(out, "feature myname=\"negamax_lab\" ping=0 setboard=1 playother=0 sigint=0 sigterm=0 done=1");
            }
            "new" => {
                self.engine.set_position(Board::new());
                self.force_mode = false;
                self.engine_color = Some(Color::Dark);
            }
            "setboard" => {
                if let Some(fen) = rest.first() {
                    let full_fen = rest.join(" ");
                    if let Ok(board) = Board::from_fen(&full_fen) {
                        self.engine.set_position(board);
                    } else if let Ok(board) = Board::from_fen(fen) {
                        self.engine.set_position(board);
                    }
                }
            }
            "force" => self.force_mode = true,
            "white" => self.engine_color = Some(Color::Dark),
            "black" => self.engine_color = Some(Color::Light),
            "go" => {
                self.force_mode = false;
                self.engine_color = Some(self.engine.board().side);
                self.make_engine_move(out);
            }
            "st" => {
                if let Some(secs) = rest.first().and_then(|s| s.parse::<i64>().ok()) {
                    self.time_per_move_cs = Some(secs * 100);
                    self.engine.config.max_depth = 32;
                }
            }
            "sd" => {
                if let Some(depth) = rest.first().and_then(|s| s.parse::<i32>().ok()) {
                    self.engine.config.max_depth = depth;
                    self.time_per_move_cs = None;
                    self.engine_time_cs = 1 << 25;
                }
            }
            "time" => {
                if let Some(cs) = rest.first().and_then(|s| s.parse::<i64>().ok()) {
                    self.engine_time_cs = cs;
                    self.time_per_move_cs = None;
                    self.engine.config.max_depth = 32;
                }
            }
            "otim" => {}
            "level" => {}
            "post" => self.post = true,
            "nopost" => self.post = false,
            "undo" => self.engine.undo_move(),
            "remove" => {
                self.engine.undo_move();
                self.engine.undo_move();
            }
            "hint" => {}
            "result" => {}
            "quit" => return XboardOutcome::Quit,
            "?" => {}
            other => {
                let mut scratch = MoveArena::new();
                if parse_move(self.engine.board(), &mut scratch, other).is_ok() {
                    let _ = self.engine.make_user_move(other);
                    if !self.force_mode && self.engine_color == Some(self.engine.board().side) {
                        self.make_engine_move(out);
                    }
                } else {
                    #[cfg(feature = "logging")]
                    log::warn!("unrecognized xboard input: {other}");
                    let _ = writeln!(out, "Error (unknown command): {other}");
                }
            }
        }
        XboardOutcome::Continue
    }

    fn make_engine_move(&mut self, out: &mut dyn std::io::Write) {
        self.engine.config.max_time_ms = match self.time_per_move_cs {
            Some(cs) => cs * 10,
            None => self.engine_time_cs * 10 / 30,
        }
        .max(100);

        let post = self.post;
        let result = if post {
            let mut print_iteration = |depth: i32, score: i32, elapsed_ms: i64, nodes: u64, pv: &[crate::board::Move]| {
                let pv_str: Vec<String> = pv.iter().map(|m| m.to_coord()).collect();
                let _ = writeln!(out, "{depth} {score} {} {nodes} {}", elapsed_ms / 10, pv_str.join(" "));
            };
            self.engine.search_with_progress(Some(&mut print_iteration))
        } else {
            self.engine.search()
        };

        if result.best_move.is_none() {
            let _ = writeln!(out, "resign");
            return;
        }
        let _ = self.engine.make_user_move(&result.best_move.to_coord());
        let _ = writeln!(out, "move {}", result.best_move.to_coord());
    }
}
