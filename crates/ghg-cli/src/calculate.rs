//! # Calculation Subcommands
//!
//! `calc`, `electricity`, `travel` and `spend`: one calculation each,
//! printed as the engine's JSON result.

use std::io::Write;

use anyhow::Result;
use clap::Args;
use ghg_engine::Selectors;

use crate::context::CliContext;
use crate::emit;

/// Arguments for `ghg calc`.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Activity identifier (see `ghg factors list`).
    pub activity: String,

    /// Quantity in the activity's unit.
    #[arg(allow_negative_numbers = true)]
    pub quantity: f64,

    /// Region code (ISO 3166 alpha-2, UK for the United Kingdom).
    #[arg(long)]
    pub region: Option<String>,

    /// Variant, e.g. vehicle size or cabin class.
    #[arg(long)]
    pub variant: Option<String>,

    /// Industry sub-category for spend-based activities.
    #[arg(long)]
    pub sub_category: Option<String>,
}

/// Arguments for `ghg electricity`.
#[derive(Args, Debug)]
pub struct ElectricityArgs {
    /// Consumption in kWh.
    #[arg(allow_negative_numbers = true)]
    pub kwh: f64,

    #[arg(long)]
    pub region: Option<String>,

    /// Share of consumption from renewable sources, 0–100.
    #[arg(long, default_value_t = 0.0)]
    pub renewable_percentage: f64,
}

/// Arguments for `ghg travel`.
#[derive(Args, Debug)]
pub struct TravelArgs {
    #[arg(allow_negative_numbers = true)]
    pub distance_km: f64,

    /// car_petrol, car_diesel, car_electric, flight_domestic,
    /// flight_short_haul, flight_long_haul, train, bus, or an activity id.
    pub travel_type: String,

    /// Travel class or vehicle size.
    #[arg(long = "class")]
    pub travel_class: Option<String>,
}

/// Arguments for `ghg spend`.
#[derive(Args, Debug)]
pub struct SpendArgs {
    #[arg(allow_negative_numbers = true)]
    pub amount: f64,

    /// purchased_goods, capital_goods, services or transport.
    pub category: String,

    #[arg(long)]
    pub sub_category: Option<String>,

    /// ISO 4217 currency code; USD when omitted.
    #[arg(long)]
    pub currency: Option<String>,
}

pub fn run_calc(args: &CalcArgs, ctx: &CliContext, out: &mut dyn Write) -> Result<u8> {
    let engine = ctx.engine()?;
    let selectors = Selectors {
        region: args.region.as_deref(),
        variant: args.variant.as_deref(),
        sub_category: args.sub_category.as_deref(),
    };
    emit(out, engine.calculate(&args.activity, args.quantity, &selectors))
}

pub fn run_electricity(args: &ElectricityArgs, ctx: &CliContext, out: &mut dyn Write) -> Result<u8> {
    let engine = ctx.engine()?;
    emit(
        out,
        engine.calculate_electricity(args.kwh, args.region.as_deref(), args.renewable_percentage),
    )
}

pub fn run_travel(args: &TravelArgs, ctx: &CliContext, out: &mut dyn Write) -> Result<u8> {
    let engine = ctx.engine()?;
    emit(
        out,
        engine.calculate_travel(args.distance_km, &args.travel_type, args.travel_class.as_deref()),
    )
}

pub fn run_spend(args: &SpendArgs, ctx: &CliContext, out: &mut dyn Write) -> Result<u8> {
    let engine = ctx.engine()?;
    emit(
        out,
        engine.calculate_spend(
            args.amount,
            &args.category,
            args.sub_category.as_deref(),
            args.currency.as_deref(),
        ),
    )
}
