mod adapter;
mod cli;
mod domain;
mod ports;
mod usecase;
mod wiring;

#[cfg(test)]
mod tests;

use std::process;
use adapter::render;
use cli::{config_to_command, parse_args, print_completion, Config, ParseOutcome};
use common::error::Error;
use common::ports::outbound::{LogLevel, LogRecord};
use domain::MapCommand;
use ports::inbound::UseCaseRunner;
use usecase::collect;
use wiring::{wire_map, App};

const RECENT_CELL_MAX_CHARS: usize = 40;

/// Command をディスパッチする Runner（match は main レイヤーに集約）
struct Runner {
    app: App,
}

impl Runner {
    fn dispatch(&self, cmd: MapCommand) -> Result<i32, Error> {
        match cmd {
            MapCommand::Help => {
                print_help();
                Ok(0)
            }
            MapCommand::Submit {
                category,
                provided,
                notify,
                dry_run,
            } => {
                for line in render::render_disabled(&self.app.disabled) {
                    eprintln!("map: {}", line);
                }
                self.app.submit.ensure_ready()?;
                let fields = collect(
                    category,
                    provided,
                    self.app.field_prompt.as_ref(),
                    self.app.interrupt.as_ref(),
                )?;
                if let Err(e) = self.app.interrupt.arm() {
                    let _ = self.app.logger.log(
                        &LogRecord::new(LogLevel::Warn, e.to_string())
                            .layer("cli")
                            .kind("lifecycle"),
                    );
                }
                let report = self
                    .app
                    .submit
                    .run(fields, notify && !dry_run)
                    .map_err(|e| {
                        if let Some(stage) = failed_stage_message(&e) {
                            eprintln!("{}", stage);
                        }
                        e
                    })?;
                print!(
                    "{}",
                    render::render_submit(&report, self.app.config.fallback_decision, self.app.color)
                );
                if dry_run {
                    println!("(dry-run: 시트에는 기록하지 않았습니다)");
                }
                Ok(report.exit_code())
            }
            MapCommand::Recent { limit } => {
                let rows = self.app.status.recent(limit)?;
                if rows.is_empty() {
                    println!("아직 데이터가 없습니다.");
                } else {
                    println!("{}", render::render_rows(&rows, RECENT_CELL_MAX_CHARS));
                }
                Ok(0)
            }
            MapCommand::Status => {
                let board = self.app.status.board()?;
                print!("{}", render::render_board(&board, self.app.color));
                Ok(0)
            }
        }
    }
}

impl UseCaseRunner for Runner {
    fn run(&self, config: Config) -> Result<i32, Error> {
        let cmd = config_to_command(config)?;
        let command_name = cmd.name();
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command started")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name),
        );

        let result = self.dispatch(cmd);

        let code = match &result {
            Ok(code) => *code,
            Err(e) => e.exit_code(),
        };
        let _ = self.app.logger.log(
            &LogRecord::new(LogLevel::Info, "command finished")
                .layer("cli")
                .kind("lifecycle")
                .field("command", command_name)
                .field("exit_code", code),
        );
        if let Err(ref e) = result {
            let _ = self.app.logger.log(
                &LogRecord::new(LogLevel::Error, e.to_string())
                    .layer("cli")
                    .kind("error"),
            );
        }
        result
    }
}

/// 判定が出せなかったときに、どの段階で止まったかを明示する
fn failed_stage_message(e: &Error) -> Option<&'static str> {
    match e {
        Error::ClassificationUnavailable(_) => {
            Some("❌ 분석 실패: 판정을 생성하지 못했습니다. 기록은 저장되지 않았습니다.")
        }
        Error::ConfigurationMissing(_) => {
            Some("❌ 분석 불가: 설정이 없어 판정을 생성할 수 없습니다. 기록은 저장되지 않았습니다.")
        }
        Error::Interrupted(_) => Some("⏹ 중단됨: 기록은 저장되지 않았습니다."),
        _ => None,
    }
}

fn main() {
    let exit_code = match run() {
        Ok(code) => code,
        Err(e) => {
            if e.is_usage() {
                print_usage();
            }
            eprintln!("map: {}", e);
            e.exit_code()
        }
    };
    process::exit(exit_code);
}

pub fn run() -> Result<i32, Error> {
    let config = match parse_args()? {
        ParseOutcome::Config(c) => c,
        ParseOutcome::GenerateCompletion(shell) => {
            print_completion(shell);
            return Ok(0);
        }
    };
    if config.help {
        print_help();
        return Ok(0);
    }
    let app = wire_map(config.non_interactive, config.verbose, config.dry_run)?;
    let runner = Runner { app };
    runner.run(config)
}

fn print_usage() {
    eprintln!("Usage: map <check|facility|recent|status> [options]");
}

fn print_help() {
    println!("Usage: map <command> [options]");
    println!();
    println!("Commands:");
    println!("  check      Pre-session member safety check (회원 정보 / 현재 증상 / 예정 운동)");
    println!("  facility   Branch facility inspection (지점 / 담당자 / 점검 내용)");
    println!("  recent     Show the latest records (-n N, default 5)");
    println!("  status     Show per-branch inspection status (missing / stale / ok)");
    println!();
    println!("Options:");
    println!("  --member, --symptom, --exercise   Fields for 'check' (prompted when omitted)");
    println!("  --branch, --staff, --note         Fields for 'facility' (prompted when omitted)");
    println!("  --notify                          Send the result to yourself via KakaoTalk after saving");
    println!("  --dry-run                         Classify only; do not write to the spreadsheet");
    println!("  --no-interactive                  Do not prompt for missing fields (CI-friendly)");
    println!("  -v, --verbose                     Also write log records to stderr");
    println!("  --generate <shell>                Generate shell completion script (bash, zsh, fish)");
    println!("  -h, --help                        Show this help message");
    println!();
    println!("Environment:");
    println!("  OPENAI_API_KEY                    Generation service key (classification)");
    println!("  MAP_GCP_SERVICE_ACCOUNT           Service account JSON (persistence)");
    println!("  GOOGLE_APPLICATION_CREDENTIALS    Service account JSON file path (persistence)");
    println!("  KAKAO_ACCESS_TOKEN                KakaoTalk token (notification)");
    println!("  MAP_MODEL, MAP_FALLBACK_DECISION, MAP_SPREADSHEET_ID, MAP_SPREADSHEET_NAME");
    println!("  MAP_HOME                          Home directory. Config: $MAP_HOME/config/map.json; log: $MAP_HOME/logs/map.jsonl");
    println!("                                    If unset, $XDG_CONFIG_HOME/map (e.g. ~/.config/map) is used.");
    println!();
    println!("Exit codes:");
    println!("  0 saved, 64 usage, 74 classification unavailable, 75 record NOT saved, 78 not configured, 130 interrupted");
    println!();
    println!("Examples:");
    println!("  map check --member '50대 남성, 허리디스크' --symptom '오늘 허리 뻐근함' --exercise '데드리프트'");
    println!("  map facility --branch '킹스짐 2호점' --staff 김코치 --note '바닥 미끄럼' --notify");
    println!("  map status");
}
