// ==========================================
// 水泥熟料系数模拟系统 - 命令行入口
// ==========================================
// 子命令: options / baseline / target / per-type / co2 / config
// 输出: 终端表格（默认）或 JSON（--json）
// ==========================================

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use clinker_factor_sim::api::{
    ApiError, ApiResult, Co2Input, FactorSource, SelectionRequest, ValidationMode,
};
use clinker_factor_sim::app::{render, AppState};
use clinker_factor_sim::config::{config_snapshot, ConfigManager, SimulatorProfile};
use clinker_factor_sim::domain::{AllocationPolicy, DataType};
use serde::Serialize;

// ==========================================
// 命令行参数
// ==========================================

#[derive(Parser, Debug)]
#[command(name = "clinker-sim")]
#[command(about = "Clinker factor simulation and CO2 estimate for cement production planning")]
#[command(version)]
struct Cli {
    /// 配置文件路径
    #[arg(long, env = "CLINKER_SIM_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// 生产月报表（.xlsx/.xls/.csv），覆盖配置项 data_path
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Excel 工作表名，覆盖配置项 sheet_name
    #[arg(long, global = true)]
    sheet: Option<String>,

    /// 界面语言（en / zh-CN）
    #[arg(long, global = true)]
    locale: Option<String>,

    /// 可调熟料总量为负时的策略（allow / reject / clamp）
    #[arg(long, global = true)]
    policy: Option<AllocationPolicy>,

    /// 越界输入截断到边界而非报错
    #[arg(long, global = true)]
    autofix: bool,

    /// 以 JSON 输出
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 列出可选月份 / 期间 / 口径
    Options,

    /// 基准数据集与初始综合熟料系数
    Baseline(SelectionArgs),

    /// 目标综合熟料系数模拟
    Target(TargetArgs),

    /// 分品种熟料系数模拟
    PerType(PerTypeArgs),

    /// CO₂ 排放估算
    Co2(Co2Args),

    /// 查看或修改配置
    #[command(subcommand)]
    Config(ConfigCommand),
}

#[derive(Args, Debug, Clone)]
struct SelectionArgs {
    /// 月份
    #[arg(long)]
    month: String,

    /// 期间
    #[arg(long)]
    period: String,

    /// 数据口径（actual / budget）
    #[arg(long, default_value = "actual")]
    data_type: DataType,
}

impl SelectionArgs {
    fn to_request(&self) -> SelectionRequest {
        SelectionRequest::new(self.month.clone(), self.period.clone(), self.data_type)
    }
}

#[derive(Args, Debug)]
struct TargetArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// 目标综合熟料系数（%），默认取当前值
    #[arg(long)]
    target: Option<f64>,

    /// 可调品种（至少 2 个），可重复或逗号分隔
    #[arg(long = "type", value_delimiter = ',')]
    types: Vec<String>,
}

#[derive(Args, Debug)]
struct PerTypeArgs {
    #[command(flatten)]
    selection: SelectionArgs,

    /// 品种=新系数，如 OPC=78.5；省略 "=值" 时取当前系数
    #[arg(long = "set", value_parser = parse_override)]
    overrides: Vec<(String, Option<f64>)>,

    /// 仅显示各品种默认输入值
    #[arg(long)]
    defaults_only: bool,
}

#[derive(Args, Debug)]
struct Co2Args {
    #[arg(long)]
    month: Option<String>,

    #[arg(long)]
    period: Option<String>,

    #[arg(long, default_value = "actual")]
    data_type: DataType,

    /// 直接指定综合熟料系数（%）
    #[arg(long, conflicts_with_all = ["target", "types", "overrides"])]
    clinker_factor: Option<f64>,

    /// 先做目标综合系数模拟，再以结果估算
    #[arg(long = "from-target", conflicts_with = "overrides")]
    target: Option<f64>,

    /// 目标模拟的可调品种
    #[arg(long = "type", value_delimiter = ',', conflicts_with = "overrides")]
    types: Vec<String>,

    /// 先做分品种系数模拟，再以结果估算（品种=新系数）
    #[arg(long = "from-override", value_parser = parse_override)]
    overrides: Vec<(String, Option<f64>)>,

    /// STEC（MJ/t 熟料）
    #[arg(long)]
    stec: Option<f64>,

    /// TSR（%）
    #[arg(long)]
    tsr: Option<f64>,

    /// 燃料排放因子（kg CO₂/MJ）
    #[arg(long)]
    fuel_ef: Option<f64>,

    /// 煅烧排放系数（kg CO₂/kg 熟料）
    #[arg(long)]
    calcination_factor: Option<f64>,

    /// 调整系数
    #[arg(long)]
    adjustment_factor: Option<f64>,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// 显示生效配置
    Show,
    /// 显示配置文件路径
    Path,
    /// 修改配置项
    Set { key: String, value: String },
}

fn parse_override(raw: &str) -> Result<(String, Option<f64>), String> {
    match raw.split_once('=') {
        Some((cement_type, value)) => {
            let cement_type = cement_type.trim();
            if cement_type.is_empty() {
                return Err(format!("缺少水泥品种: {}", raw));
            }
            let value = value
                .trim()
                .parse::<f64>()
                .map_err(|_| format!("无法解析为浮点数: {}", value))?;
            Ok((cement_type.to_string(), Some(value)))
        }
        None => Ok((raw.trim().to_string(), None)),
    }
}

// ==========================================
// 主流程
// ==========================================

fn main() -> anyhow::Result<()> {
    clinker_factor_sim::logging::init();

    let cli = Cli::parse();
    tracing::debug!(version = clinker_factor_sim::VERSION, "启动");

    let manager = match &cli.config {
        Some(path) => ConfigManager::new(path.clone()),
        None => ConfigManager::from_default_location(),
    };

    if let Command::Config(cmd) = &cli.command {
        return run_config(&manager, cmd, cli.json);
    }

    let profile = merge_profile(manager.load()?, &cli);
    let mode = if cli.autofix {
        ValidationMode::AutoFix
    } else {
        ValidationMode::Strict
    };

    let result = AppState::new(profile, mode).and_then(|state| run(&state, &cli));
    match result {
        Ok(output) => {
            print!("{}", output);
            Ok(())
        }
        Err(err) if err.is_warning() => {
            tracing::warn!(error = %err, "模拟未执行");
            eprintln!("⚠️ {}", err.user_message());
            Ok(())
        }
        Err(err) => Err(anyhow::Error::new(err)).context("模拟失败"),
    }
}

fn merge_profile(mut profile: SimulatorProfile, cli: &Cli) -> SimulatorProfile {
    if let Some(data) = &cli.data {
        profile.data_path = Some(data.clone());
    }
    if let Some(sheet) = &cli.sheet {
        profile.sheet_name = sheet.clone();
    }
    if let Some(locale) = &cli.locale {
        profile.locale = locale.clone();
    }
    if let Some(policy) = cli.policy {
        profile.allocation_policy = policy;
    }
    profile
}

fn run(state: &AppState, cli: &Cli) -> ApiResult<String> {
    let api = &state.simulation_api;

    match &cli.command {
        Command::Options => {
            let options = api.list_options()?;
            output(cli.json, &options, || render::render_options(&options))
        }
        Command::Baseline(args) => {
            let baseline = api.get_baseline(&args.to_request())?;
            output(cli.json, &baseline, || render::render_baseline(&baseline))
        }
        Command::Target(args) => {
            let simulation =
                api.simulate_target(&args.selection.to_request(), args.target, &args.types)?;
            output(cli.json, &simulation, || render::render_simulation(&simulation))
        }
        Command::PerType(args) => {
            let selection = args.selection.to_request();
            if args.defaults_only {
                let types: Vec<String> = args.overrides.iter().map(|(t, _)| t.clone()).collect();
                let defaults = api.get_override_defaults(&selection, &types)?;
                return output(cli.json, &defaults, || {
                    defaults
                        .iter()
                        .map(|d| format!("{}: {:.2}\n", d.cement_type, d.clinker_factor))
                        .collect()
                });
            }
            let simulation = api.simulate_per_type(&selection, &args.overrides)?;
            output(cli.json, &simulation, || render::render_simulation(&simulation))
        }
        Command::Co2(args) => {
            let input = Co2Input {
                stec: args.stec,
                tsr: args.tsr,
                fuel_emission_factor: args.fuel_ef,
                calcination_factor: args.calcination_factor,
                adjustment_factor: args.adjustment_factor,
            };
            let co2 = match args.clinker_factor {
                Some(cf) => api.estimate_co2(cf, FactorSource::Manual, &input)?,
                None => {
                    let selection = co2_selection(args)?;
                    if args.target.is_some() || !args.types.is_empty() {
                        let simulation = api.simulate_target(&selection, args.target, &args.types)?;
                        api.estimate_co2_for_simulation(&simulation, &input)?
                    } else if !args.overrides.is_empty() {
                        let simulation = api.simulate_per_type(&selection, &args.overrides)?;
                        api.estimate_co2_for_simulation(&simulation, &input)?
                    } else {
                        api.estimate_co2_for_baseline(&selection, &input)?
                    }
                }
            };
            output(cli.json, &co2, || render::render_co2(&co2))
        }
        Command::Config(_) => Err(ApiError::InternalError("config 子命令不经过 AppState".to_string())),
    }
}

fn co2_selection(args: &Co2Args) -> ApiResult<SelectionRequest> {
    match (&args.month, &args.period) {
        (Some(month), Some(period)) => Ok(SelectionRequest::new(month.clone(), period.clone(), args.data_type)),
        _ => Err(ApiError::InvalidInput(
            "需要 --clinker-factor，或同时指定 --month 与 --period".to_string(),
        )),
    }
}

fn output<T: Serialize>(json: bool, value: &T, text: impl FnOnce() -> String) -> ApiResult<String> {
    if json {
        let mut s = serde_json::to_string_pretty(value)
            .map_err(|e| ApiError::InternalError(format!("JSON 序列化失败: {}", e)))?;
        s.push('\n');
        Ok(s)
    } else {
        Ok(text())
    }
}

fn run_config(manager: &ConfigManager, cmd: &ConfigCommand, json: bool) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Path => println!("{}", manager.path().display()),
        ConfigCommand::Show => {
            let profile = manager.load()?;
            let snapshot = config_snapshot(&profile);
            if json {
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            } else if let Some(map) = snapshot.as_object() {
                for (key, value) in map {
                    println!("{} = {}", key, value);
                }
            }
        }
        ConfigCommand::Set { key, value } => {
            manager
                .update(key, value)
                .with_context(|| format!("更新配置项 {} 失败", key))?;
            println!("{} = {}", key, value);
        }
    }
    Ok(())
}
