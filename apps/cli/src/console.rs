//! # Operator Console
//!
//! Line-oriented REPL over the [`PosEngine`]. One command per line; quoted
//! arguments are supported so product names with spaces work:
//!
//! ```text
//! kirana> product A1 "Tea Dust" 10.00 3
//! kirana> scan A1
//! added Tea Dust (qty 1)
//! kirana> qty A1 3
//! kirana> bill
//! ```
//!
//! Domain rejections are printed with the core's own messages and the loop
//! continues; only I/O failures during startup end the process.

use std::path::PathBuf;

use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

use kirana_core::{invoice, Money, ScanOutcome, UpiProfile};
use kirana_store::PosEngine;

const PROMPT: &str = "kirana> ";

enum Flow {
    Continue,
    Quit,
}

/// Runs the console loop until `quit`, Ctrl-D, or an editor failure.
pub fn run(mut engine: PosEngine) -> Result<(), Box<dyn std::error::Error>> {
    let mut editor = DefaultEditor::new()?;
    println!("Kirana POS. Type 'help' for commands, 'quit' to exit.");

    loop {
        match editor.readline(PROMPT) {
            Ok(line) => {
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                let _ = editor.add_history_entry(line);

                let words = match shell_words::split(line) {
                    Ok(words) => words,
                    Err(err) => {
                        println!("error: {err}");
                        continue;
                    }
                };
                if words.is_empty() {
                    continue;
                }

                match dispatch(&mut engine, &words) {
                    Ok(Flow::Continue) => {}
                    Ok(Flow::Quit) => break,
                    Err(msg) => println!("error: {msg}"),
                }
            }
            // Ctrl-C abandons the current line, not the session
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => return Err(err.into()),
        }
    }
    Ok(())
}

fn dispatch(engine: &mut PosEngine, words: &[String]) -> Result<Flow, String> {
    match words[0].as_str() {
        "scan" => {
            let code = arg(words, 1, "scan <code>")?;
            match engine.add_scan(code).map_err(stringify)? {
                ScanOutcome::Added => {
                    let name = entry_name(engine, code);
                    println!("added {name} (qty 1)");
                }
                ScanOutcome::CustomerAttached => {
                    let name = entry_name(engine, code);
                    println!("customer attached: {name}");
                }
                ScanOutcome::AlreadyInCart => {
                    println!("{code} already in cart; use 'qty {code} <n>' to change quantity");
                }
                ScanOutcome::Debounced => println!("(repeat scan ignored)"),
            }
            Ok(Flow::Continue)
        }
        "qty" => {
            let code = arg(words, 1, "qty <code> <quantity>")?;
            let quantity = parse_quantity(arg(words, 2, "qty <code> <quantity>")?)?;
            engine.set_quantity(code, quantity).map_err(stringify)?;
            println!("{} x{}", code, quantity);
            Ok(Flow::Continue)
        }
        "cart" => {
            print_cart(engine);
            Ok(Flow::Continue)
        }
        "clear" => {
            engine.clear_cart();
            println!("cart cleared");
            Ok(Flow::Continue)
        }
        "bill" => {
            let receipt = engine.commit_sale().map_err(stringify)?;
            print!("{}", invoice::invoice_text(&receipt, engine.upi_profile()));
            Ok(Flow::Continue)
        }
        "product" => {
            let usage = "product <code> <name> <price> <quantity>";
            let code = arg(words, 1, usage)?;
            let name = arg(words, 2, usage)?;
            let price = parse_price(arg(words, 3, usage)?)?;
            let quantity = parse_quantity(arg(words, 4, usage)?)?;
            engine
                .upsert_product(code, name, price, quantity)
                .map_err(stringify)?;
            println!("saved product {code}");
            Ok(Flow::Continue)
        }
        "customer" => {
            let usage = "customer <code> <name> <phone>";
            let code = arg(words, 1, usage)?;
            let name = arg(words, 2, usage)?;
            let phone = arg(words, 3, usage)?;
            engine.upsert_customer(code, name, phone).map_err(stringify)?;
            println!("saved customer {code}");
            Ok(Flow::Continue)
        }
        "stock" => {
            let usage = "stock <code> <quantity>";
            let code = arg(words, 1, usage)?;
            let quantity = parse_quantity(arg(words, 2, usage)?)?;
            engine.adjust_stock(code, quantity).map_err(stringify)?;
            println!("{code} stock set to {quantity}");
            Ok(Flow::Continue)
        }
        "inventory" => {
            print_inventory(engine);
            Ok(Flow::Continue)
        }
        "upi" => {
            let usage = "upi <payee-id> <payee-name> <note>";
            let payee_id = arg(words, 1, usage)?;
            let payee_name = arg(words, 2, usage)?;
            let note = arg(words, 3, usage)?;
            engine
                .save_upi_profile(UpiProfile::new(payee_id, payee_name, note))
                .map_err(stringify)?;
            println!("UPI profile saved");
            Ok(Flow::Continue)
        }
        "history" => {
            print_history(engine);
            Ok(Flow::Continue)
        }
        "dashboard" => {
            print_dashboard(engine);
            Ok(Flow::Continue)
        }
        "export" => {
            let path = PathBuf::from(arg(words, 1, "export <file>")?);
            engine.export_to(&path).map_err(stringify)?;
            println!("exported to {}", path.display());
            Ok(Flow::Continue)
        }
        "import" => {
            let path = PathBuf::from(arg(words, 1, "import <file>")?);
            engine.import_from(&path).map_err(stringify)?;
            println!("imported from {}", path.display());
            Ok(Flow::Continue)
        }
        "help" => {
            print_help();
            Ok(Flow::Continue)
        }
        "quit" | "exit" => Ok(Flow::Quit),
        other => Err(format!("unknown command '{other}'; try 'help'")),
    }
}

// =============================================================================
// Argument Parsing
// =============================================================================

fn arg<'a>(words: &'a [String], index: usize, usage: &str) -> Result<&'a str, String> {
    words
        .get(index)
        .map(String::as_str)
        .ok_or_else(|| format!("usage: {usage}"))
}

fn parse_quantity(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("invalid quantity: {raw}"))
}

fn parse_price(raw: &str) -> Result<Money, String> {
    Money::parse_rupees(raw).ok_or_else(|| format!("invalid price: {raw}"))
}

fn stringify(err: kirana_store::StoreError) -> String {
    err.to_string()
}

// =============================================================================
// Rendering
// =============================================================================

fn entry_name(engine: &PosEngine, code: &str) -> String {
    engine
        .catalog()
        .get(code)
        .map(|entry| entry.name().to_string())
        .unwrap_or_else(|| code.to_string())
}

fn print_cart(engine: &PosEngine) {
    if engine.cart().is_empty() {
        println!("cart is empty");
        return;
    }
    for line in engine.cart().lines() {
        match engine.catalog().get(&line.code) {
            Some(entry) if entry.is_customer() => {
                println!("  [customer] {} ({})", entry.name(), line.code);
            }
            Some(entry) => {
                let total = entry
                    .price()
                    .map(|p| p.multiply_quantity(line.quantity))
                    .unwrap_or_else(Money::zero);
                println!(
                    "  {} x{}  Rs. {}",
                    entry.name(),
                    line.quantity,
                    total.to_decimal_string()
                );
            }
            None => println!("  {} x{}", line.code, line.quantity),
        }
    }
    println!("total: Rs. {}", engine.cart_total().to_decimal_string());
}

fn print_inventory(engine: &PosEngine) {
    if engine.stock().is_empty() {
        println!("no products");
        return;
    }
    for (code, quantity) in engine.stock().iter() {
        let name = entry_name(engine, code);
        let price = engine
            .catalog()
            .get(code)
            .and_then(|entry| entry.price())
            .unwrap_or_else(Money::zero);
        println!(
            "  {code}  {name}  Rs. {}  qty {quantity}",
            price.to_decimal_string()
        );
    }
}

fn print_history(engine: &PosEngine) {
    if engine.history().is_empty() {
        println!("no sales yet");
        return;
    }
    for record in engine.history().records() {
        println!(
            "  {}  Rs. {}  ({} items)",
            record.timestamp.format("%d/%m/%Y %H:%M:%S"),
            record.total().to_decimal_string(),
            record.lines.len()
        );
    }
}

fn print_dashboard(engine: &PosEngine) {
    println!(
        "total sales: Rs. {}  ({} bills)",
        engine.total_sales().to_decimal_string(),
        engine.history().len()
    );
    let low: Vec<_> = engine.low_stock().collect();
    if low.is_empty() {
        println!("no low-stock items");
    } else {
        println!("low stock:");
        for (code, quantity) in low {
            println!("  {}  {} left", entry_name(engine, code), quantity);
        }
    }
}

fn print_help() {
    println!("commands:");
    println!("  scan <code>                          add a scanned code to the cart");
    println!("  qty <code> <n>                       set a cart line's quantity");
    println!("  cart                                 show the cart");
    println!("  clear                                empty the cart");
    println!("  bill                                 commit the sale and print the bill");
    println!("  product <code> <name> <price> <qty>  save a product");
    println!("  customer <code> <name> <phone>       save a customer");
    println!("  stock <code> <n>                     correct a stock level");
    println!("  inventory                            list all products");
    println!("  upi <payee-id> <payee-name> <note>   save UPI payment details");
    println!("  history                              list committed sales");
    println!("  dashboard                            total sales and low stock");
    println!("  export <file> / import <file>        backup and restore");
    println!("  quit                                 exit");
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quantity() {
        assert_eq!(parse_quantity("3"), Ok(3));
        assert_eq!(parse_quantity("-2"), Ok(-2));
        assert!(parse_quantity("three").is_err());
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("10.00"), Ok(Money::from_paise(1000)));
        assert_eq!(parse_price("45.5"), Ok(Money::from_paise(4550)));
        assert!(parse_price("free").is_err());
    }

    #[test]
    fn test_arg_reports_usage() {
        let words: Vec<String> = vec!["qty".into()];
        let err = arg(&words, 1, "qty <code> <quantity>").unwrap_err();
        assert!(err.contains("usage"));
    }
}
