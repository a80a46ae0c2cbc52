//! Basic Analysis Example
//!
//! Loads daily price files from a folder and walks through the report,
//! averages, returns, correlation and chart helpers.
//!
//! ```text
//! cargo run --example basic_analysis -- <folder> AAPL.csv MSFT.csv
//! ```

use std::env;
use std::error::Error;
use stock_toolkit::prelude::*;

fn main() -> std::result::Result<(), Box<dyn Error>> {
    // Initialize logging
    stock_toolkit::init_logger()?;

    let mut args = env::args().skip(1);
    let folder = args.next().unwrap_or_else(|| "data".to_string());
    let files: Vec<String> = args.collect();
    if files.len() < 2 {
        return Err("usage: basic_analysis <folder> <file> <file> [file...]".into());
    }

    println!("📊 Basic Analysis Example");
    println!("{}", "=".repeat(60));

    let session = SessionBuilder::new()
        .app_name("BasicAnalysis")
        .master("local[*]")
        .build()?;

    let stocks = session.read_files(&folder, &files)?;

    // Example 1: Full report of the first file
    println!("\n{}", get_info_df(&stocks[0], &files[0])?);

    // Example 2: Monthly averages and the best trading days
    println!("\n📈 Monthly average close of {}", files[0]);
    println!("{}", get_average_month(&stocks[0], "Close")?);

    let with_returns = calculate_daily_return(&stocks[0])?;
    if let Some(best) = get_highest_dr(&with_returns, &DateRange::all())? {
        println!("\n🏆 Highest daily returns");
        println!("{}", best.show(5));
    }

    // Example 3: How closely the first two stocks move together
    let r = calculate_stock_correlation(&stocks[0], &stocks[1], &DateRange::all())?;
    println!("\n🔗 Correlation {} / {}: {:.4}", files[0], files[1], r);

    // Example 4: One chart with every stock
    let mut chart = plot_stock();
    for (file, stock) in files.iter().zip(&stocks) {
        add_trace_plot(stock, "Close", &mut chart, file)?;
    }
    chart.write_html("basic_analysis.html")?;
    println!("\n✅ Chart written to basic_analysis.html");

    Ok(())
}
