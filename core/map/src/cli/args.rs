use crate::domain::MapCommand;
use clap::builder::ArgAction;
use clap::value_parser;
use clap_complete::Shell;
use common::domain::Category;
use common::error::Error;

const DEFAULT_RECENT_LIMIT: usize = 5;

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub help: bool,
    /// --no-interactive: 未入力の項目を問い合わせない（CI 等でブロックしない）
    pub non_interactive: bool,
    /// -v / --verbose: ログを stderr にも出す
    pub verbose: bool,
    /// サブコマンド名（check / facility / recent / status）
    pub command: Option<String>,
    pub member: Option<String>,
    pub symptom: Option<String>,
    pub exercise: Option<String>,
    pub branch: Option<String>,
    pub staff: Option<String>,
    pub note: Option<String>,
    /// --notify: 保存後にカカオトークで自分宛てに送る
    pub notify: bool,
    /// --dry-run: 判定だけ行い、シートには書かずメモリに残す
    pub dry_run: bool,
    /// recent -n
    pub limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            help: false,
            non_interactive: false,
            verbose: false,
            command: None,
            member: None,
            symptom: None,
            exercise: None,
            branch: None,
            staff: None,
            note: None,
            notify: false,
            dry_run: false,
            limit: DEFAULT_RECENT_LIMIT,
        }
    }
}

/// 解析結果: 通常の Config / 補完スクリプト生成
#[derive(Debug, Clone)]
pub enum ParseOutcome {
    Config(Config),
    GenerateCompletion(Shell),
}

fn field_arg(name: &'static str, help: &'static str) -> clap::Arg {
    clap::Arg::new(name)
        .long(name)
        .value_name("text")
        .help(help)
        .num_args(1)
}

fn submit_args(cmd: clap::Command) -> clap::Command {
    cmd.arg(
        clap::Arg::new("notify")
            .long("notify")
            .help("Send the result to yourself via KakaoTalk after saving")
            .action(ArgAction::SetTrue),
    )
    .arg(
        clap::Arg::new("dry-run")
            .long("dry-run")
            .help("Classify only; keep the record in memory instead of the spreadsheet")
            .action(ArgAction::SetTrue),
    )
}

pub(crate) fn build_clap_command() -> clap::Command {
    clap::Command::new("map")
        .about("MAP safety check: classify a session or facility check and log it to the spreadsheet")
        .disable_help_flag(true)
        .disable_help_subcommand(true)
        .subcommand_required(false)
        .arg(
            clap::Arg::new("help")
                .short('h')
                .long("help")
                .help("Show this help message")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("no-interactive")
                .long("no-interactive")
                .help("Do not prompt for missing fields (CI-friendly)")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("verbose")
                .short('v')
                .long("verbose")
                .help("Also write log records to stderr")
                .global(true)
                .action(ArgAction::SetTrue),
        )
        .arg(
            clap::Arg::new("generate")
                .long("generate")
                .value_name("shell")
                .help("Generate shell completion script")
                .value_parser(value_parser!(Shell))
                .num_args(1),
        )
        .subcommand(submit_args(
            clap::Command::new("check")
                .about("Pre-session member safety check")
                .disable_help_flag(true)
                .arg(field_arg("member", "Member profile (회원 정보)"))
                .arg(field_arg("symptom", "Current symptom (현재 증상)"))
                .arg(field_arg("exercise", "Planned exercise (예정 운동)")),
        ))
        .subcommand(submit_args(
            clap::Command::new("facility")
                .about("Branch facility inspection")
                .disable_help_flag(true)
                .arg(field_arg("branch", "Branch (지점)"))
                .arg(field_arg("staff", "Inspector (담당자)"))
                .arg(field_arg("note", "Inspection notes (점검 내용)")),
        ))
        .subcommand(
            clap::Command::new("recent")
                .about("Show the latest records")
                .disable_help_flag(true)
                .arg(
                    clap::Arg::new("limit")
                        .short('n')
                        .value_name("N")
                        .help("Number of rows (default 5)")
                        .value_parser(value_parser!(usize))
                        .num_args(1),
                ),
        )
        .subcommand(
            clap::Command::new("status")
                .about("Show per-branch inspection status")
                .disable_help_flag(true),
        )
}

fn matches_to_config(matches: &clap::ArgMatches) -> Config {
    let mut config = Config {
        help: matches.get_flag("help"),
        non_interactive: matches.get_flag("no-interactive"),
        verbose: matches.get_flag("verbose"),
        ..Default::default()
    };
    if let Some((name, sub)) = matches.subcommand() {
        config.command = Some(name.to_string());
        // サブコマンド側で指定されたグローバルフラグも拾う
        config.help |= sub.get_flag("help");
        config.non_interactive |= sub.get_flag("no-interactive");
        config.verbose |= sub.get_flag("verbose");
        let text = |id: &str| {
            sub.try_get_one::<String>(id)
                .ok()
                .flatten()
                .cloned()
        };
        let flag = |id: &str| sub.try_get_one::<bool>(id).ok().flatten().copied().unwrap_or(false);
        config.member = text("member");
        config.symptom = text("symptom");
        config.exercise = text("exercise");
        config.branch = text("branch");
        config.staff = text("staff");
        config.note = text("note");
        config.notify = flag("notify");
        config.dry_run = flag("dry-run");
        if let Ok(Some(&n)) = sub.try_get_one::<usize>("limit") {
            config.limit = n;
        }
    }
    config
}

/// コマンドラインを解析する。補完生成が要求された場合は ParseOutcome::GenerateCompletion を返す。
pub fn parse_args() -> Result<ParseOutcome, Error> {
    let matches = build_clap_command()
        .try_get_matches()
        .map_err(|e| Error::invalid_argument(e.to_string()))?;

    if let Some(&shell) = matches.get_one::<Shell>("generate") {
        return Ok(ParseOutcome::GenerateCompletion(shell));
    }

    Ok(ParseOutcome::Config(matches_to_config(&matches)))
}

/// テスト用: 引数スライスから解析する
#[allow(dead_code)]
pub fn parse_args_from(args: &[&str]) -> Result<Config, Error> {
    let matches = build_clap_command()
        .try_get_matches_from(args)
        .map_err(|e| Error::invalid_argument(e.to_string()))?;
    Ok(matches_to_config(&matches))
}

/// 補完スクリプトを標準出力に出力する。
pub fn print_completion(shell: Shell) {
    let mut cmd = build_clap_command();
    clap_complete::generate(shell, &mut cmd, "map", &mut std::io::stdout());
}

/// Config を MapCommand に変換する
pub fn config_to_command(config: Config) -> Result<MapCommand, Error> {
    if config.help {
        return Ok(MapCommand::Help);
    }
    match config.command.as_deref() {
        Some("check") => Ok(MapCommand::Submit {
            category: Category::SessionSafety,
            provided: vec![config.member, config.symptom, config.exercise],
            notify: config.notify,
            dry_run: config.dry_run,
        }),
        Some("facility") => Ok(MapCommand::Submit {
            category: Category::FacilityCheck,
            provided: vec![config.branch, config.staff, config.note],
            notify: config.notify,
            dry_run: config.dry_run,
        }),
        Some("recent") => Ok(MapCommand::Recent {
            limit: config.limit.max(1),
        }),
        Some("status") => Ok(MapCommand::Status),
        Some(other) => Err(Error::invalid_argument(format!("Unknown command '{}'", other))),
        None => Err(Error::invalid_argument(
            "No command given. Use 'map check', 'map facility', 'map recent' or 'map status'.",
        )),
    }
}
