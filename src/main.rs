use launchcalc::curve::{PriceCurve, PriceTable};
use launchcalc::diamond::DiamondHandFee;
use launchcalc::dump::{intervention_strength, is_dump_event};
use launchcalc::form::{validate, validate_wallet_address, FieldKind};
use launchcalc::graduation::{usd_value, GraduationParams};
use launchcalc::plot::{plot_fee_vs_progress, plot_price_vs_supply, plot_timeline};
use launchcalc::timeline::{read_plan, simulate, Timeline, TradeStep, DEFAULT_PLAN};
use launchcalc::verifier::{verify_distribution, verify_table};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use std::fs::{create_dir_all, File};
use std::io::Write;

#[derive(Parser, Debug)]
#[command(
    name = "launchcalc",
    version,
    about = "Launchpad graduation, pricing and fee calculator"
)]
struct Args {
    /// graduation | price | fee | dump | validate | address | verify | schedule
    #[arg(long, default_value = "schedule")]
    mode: String,

    #[arg(long)]
    market_cap: Option<f64>,
    /// GALA price in USD, reported next to graduation amounts
    #[arg(long)]
    gala_usd: Option<f64>,

    #[arg(long)]
    supply: Option<u64>,
    /// Tokens to quote a buy and sell for at --supply
    #[arg(long)]
    tokens: Option<u64>,

    #[arg(long)]
    progress: Option<f64>,
    #[arg(long, default_value_t = 0.01)]
    base_fee: f64,
    #[arg(long, default_value_t = 10.0)]
    max_multiplier: f64,

    /// Signed price change in percent (negative = drop)
    #[arg(long, allow_hyphen_values = true)]
    price_change: Option<f64>,
    #[arg(long, default_value_t = 10.0)]
    dump_threshold: f64,
    /// Fees available to the stabiliser (GALA)
    #[arg(long, default_value_t = 0.0)]
    available_fees: f64,

    #[arg(long, value_enum)]
    field: Option<FieldKind>,
    #[arg(long)]
    value: Option<String>,
    #[arg(long)]
    address: Option<String>,

    /// JSON file overriding graduation parameters
    #[arg(long)]
    params_path: Option<String>,
    /// JSON file with a custom [{supply, price}, ...] table
    #[arg(long)]
    table_path: Option<String>,
    /// CSV trade plan with an `action,amount` header
    #[arg(long)]
    plan_path: Option<String>,

    #[arg(long, default_value = "out")]
    out_dir: String,
    #[arg(long = "no-draw", action = clap::ArgAction::SetFalse, default_value_t = true)]
    draw: bool,
    #[arg(long, action = clap::ArgAction::SetTrue)]
    verbose: bool,
}

fn load_params(args: &Args) -> Result<GraduationParams> {
    let params: GraduationParams = match &args.params_path {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open params {path}"))?;
            serde_json::from_reader(f).with_context(|| format!("parse params {path}"))?
        }
        None => GraduationParams::default(),
    };
    params.validate()?;
    Ok(params)
}

fn load_table(args: &Args) -> Result<PriceTable> {
    match &args.table_path {
        Some(path) => {
            let f = File::open(path).with_context(|| format!("open table {path}"))?;
            Ok(serde_json::from_reader(f).with_context(|| format!("parse table {path}"))?)
        }
        None => Ok(PriceTable::calibrated()),
    }
}

fn load_fee(args: &Args) -> Result<DiamondHandFee> {
    if !args.base_fee.is_finite() || args.base_fee < 0.0 {
        return Err(anyhow!("base_fee must be finite and ≥ 0 (got {})", args.base_fee));
    }
    if !args.max_multiplier.is_finite() || args.max_multiplier < 0.0 {
        return Err(anyhow!("max_multiplier must be finite and ≥ 0 (got {})", args.max_multiplier));
    }
    Ok(DiamondHandFee { base_fee: args.base_fee, max_multiplier: args.max_multiplier })
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match args.mode.as_str() {
        "graduation" => run_graduation(&args, &load_params(&args)?),
        "price" => run_price(&args),
        "fee" => {
            let fee = load_fee(&args)?;
            let p = args.progress.ok_or_else(|| anyhow!("fee: need --progress"))?;
            println!("sell fee at {:.2}% progress: {:.6} (max {:.6})", p, fee.sell_fee(p), fee.max_fee());
            Ok(())
        }
        "dump" => run_dump(&args),
        "validate" => {
            let field = args.field.ok_or_else(|| anyhow!("validate: need --field"))?;
            let value = args.value.as_deref().ok_or_else(|| anyhow!("validate: need --value"))?;
            print_json(&validate(field, value))
        }
        "address" => {
            let addr = args.address.as_deref().ok_or_else(|| anyhow!("address: need --address"))?;
            print_json(&validate_wallet_address(addr))
        }
        "verify" => run_verify(&args, &load_params(&args)?),
        "schedule" => run_schedule(&args, &load_params(&args)?, &load_fee(&args)?),
        m => Err(anyhow!("unknown mode: {}", m)),
    }
}

fn run_graduation(args: &Args, params: &GraduationParams) -> Result<()> {
    let mc = args.market_cap.ok_or_else(|| anyhow!("graduation: need --market-cap"))?;
    let result = params.evaluate(mc);
    print_json(&result)?;
    if args.verbose && result.graduated {
        let rep = params.distribution_report(mc);
        println!(
            "  creator={:.4}% platform={:.4}% dex={:.4}% err={:.3e} healthy={}",
            rep.creator_percent, rep.platform_percent, rep.dex_percent, rep.distribution_error, rep.is_valid
        );
    }
    if let (Some(px), true) = (args.gala_usd, result.graduated) {
        println!(
            "  creator reward ≈ ${:.2}, dex pool ≈ ${:.2}",
            usd_value(result.creator_reward, px),
            usd_value(result.dex_pool_amount, px)
        );
    }
    Ok(())
}

fn run_price(args: &Args) -> Result<()> {
    let table = load_table(args)?;
    let supply = args.supply.ok_or_else(|| anyhow!("price: need --supply"))?;
    println!("[{}] price at supply {}: {:.6}", table.name(), supply, table.price_at(supply));
    if let Some(tokens) = args.tokens {
        println!("  buy {} tokens: {:.6} GALA", tokens, table.buy_cost(supply, tokens));
        match table.sell_proceeds(supply, tokens) {
            Ok(v) => println!("  sell {} tokens: {:.6} GALA", tokens, v),
            Err(e) => println!("  sell {} tokens: {}", tokens, e),
        }
    }
    Ok(())
}

fn run_dump(args: &Args) -> Result<()> {
    let change = args.price_change.ok_or_else(|| anyhow!("dump: need --price-change"))?;
    let triggered = is_dump_event(change, args.dump_threshold);
    println!("dump event at {:+.2}% (threshold {:.2}%): {}", change, args.dump_threshold, triggered);
    if triggered {
        print_json(&intervention_strength(change, args.available_fees, args.dump_threshold)?)?;
    }
    Ok(())
}

fn run_verify(args: &Args, params: &GraduationParams) -> Result<()> {
    let table = load_table(args)?;
    let t = verify_table(&table)?;
    println!(
        "[{}] points={} max_err={:.3e} falling_segments={} clamps_ok={}",
        table.name(),
        t.points,
        t.max_point_err,
        t.falling_segments,
        t.clamps_ok
    );
    let caps: Vec<f64> = (0..=1000).map(|i| params.threshold + i as f64 * 10_000.0).collect();
    let d = verify_distribution(params, &caps)?;
    println!(
        "[split] graduated={} skipped={} max_err={:.3e} sum_caps={:.6} sum_alloc={:.6}",
        d.graduated, d.skipped, d.max_split_err, d.market_cap_sum, d.allocated_sum
    );
    if !t.clamps_ok {
        return Err(anyhow!("price table does not clamp at its ends"));
    }
    Ok(())
}

fn run_schedule(args: &Args, params: &GraduationParams, fee: &DiamondHandFee) -> Result<()> {
    let plan: Vec<TradeStep> = match &args.plan_path {
        Some(path) => read_plan(File::open(path).with_context(|| format!("open plan {path}"))?)?,
        None => DEFAULT_PLAN.to_vec(),
    };
    let table = load_table(args)?;
    let timeline = simulate(&plan, &table, params, fee)?;
    create_dir_all(&args.out_dir)?;

    if args.verbose {
        for r in &timeline.rows {
            println!(
                "  step {} {:?} {:.2}: supply={} price={:.6} raised={:.2} progress={:.2}% sell_fee={:.6}",
                r.step, r.action, r.amount, r.supply, r.price, r.raised_cum, r.progress_pct, r.sell_fee
            );
        }
    }
    match &timeline.graduation {
        Some(g) => println!(
            "graduated after {} steps: creator={:.2} platform={:.2} dex={:.2}",
            timeline.rows.len(),
            g.creator_reward,
            g.platform_fee,
            g.dex_pool_amount
        ),
        None => println!("not graduated after {} steps", timeline.rows.len()),
    }

    write_schedule_csv(&args.out_dir, &timeline, table.name(), params, fee)?;
    if args.draw {
        plot_price_vs_supply(&table, table.max_supply(), &format!("{}/price_vs_supply.png", &args.out_dir))?;
        plot_fee_vs_progress(|p| fee.sell_fee(p), &format!("{}/fee_vs_progress.png", &args.out_dir))?;
        plot_timeline(&timeline.rows, params.threshold, &format!("{}/raised_per_step.png", &args.out_dir))?;
    }
    Ok(())
}

fn write_schedule_csv(
    out_dir: &str,
    timeline: &Timeline,
    curve_name: &str,
    params: &GraduationParams,
    fee: &DiamondHandFee,
) -> Result<()> {
    let file_path = format!("{}/schedule.csv", out_dir);
    let mut file = File::create(&file_path)?;

    // Write metadata header
    writeln!(file, "# Launch Schedule")?;
    writeln!(
        file,
        "# Threshold={} creator_reward={} platform_fee_rate={}",
        params.threshold, params.creator_reward, params.platform_fee_rate
    )?;
    writeln!(file, "# Sell fee: {:.4} → {:.4}", fee.base_fee, fee.max_fee())?;
    writeln!(file, "# Curve: {}", curve_name)?;
    if let Some(g) = &timeline.graduation {
        writeln!(
            file,
            "# Graduated: creator={:.6} platform={:.6} dex={:.6}",
            g.creator_reward, g.platform_fee, g.dex_pool_amount
        )?;
    }
    writeln!(file)?;

    let mut wtr = csv::Writer::from_writer(file);
    for row in &timeline.rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}
