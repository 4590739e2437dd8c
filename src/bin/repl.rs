use dice_notation::roll::{MarkdownStringifier, RollContext};
use std::io::{self, BufRead, Write};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init();

    let markdown = std::env::args().skip(1).any(|arg| arg == "--markdown");
    let mut ctx = RollContext::default();

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    print!("> ");
    io::stdout().flush()?;
    while let Some(Ok(line)) = lines.next() {
        if !line.trim().is_empty() {
            match dice_notation::roll_detailed(&line, &mut ctx) {
                Ok(rolls) => {
                    for roll in &rolls {
                        if markdown {
                            println!("{}", MarkdownStringifier::new().stringify(roll));
                        } else {
                            println!("{}", roll);
                        }
                    }
                }
                Err(why) => eprintln!("Error: {}", why),
            }
        }
        print!("> ");
        io::stdout().flush()?;
    }
    Ok(())
}
