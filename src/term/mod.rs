extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;
use ansi_term::Style;
use barebones::mach::{compile, Container, Event, Interpreter, Program};
use clap::Parser;
use linefeed::{Interface, ReadResult};
use std::fs::{self, File};
use std::io::Write;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Source file to run, or a compiled file to disassemble
    #[arg(required = false, help = "Barebones source or compiled program")]
    file: Option<String>,

    #[arg(long, short, help = "Print the variables after every statement")]
    trace: bool,

    #[arg(long, help = "Report how long the program ran")]
    time: bool,

    #[arg(long, short, value_name = "OUT", help = "Compile FILE and write bytecode to OUT")]
    compile: Option<String>,

    #[arg(long, short, help = "Compile FILE and print the disassembly")]
    list: bool,
}

pub fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let interrupted = Arc::new(AtomicBool::new(false));
    let int_moved = interrupted.clone();
    ctrlc::set_handler(move || {
        int_moved.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");
    let result = match &cli.file {
        Some(filename) => run_file(&cli, filename, &interrupted),
        None => main_loop(&interrupted),
    };
    if let Err(error) = result {
        eprintln!("{}", Style::new().bold().paint(error.to_string()));
        std::process::exit(1);
    }
}

fn run_file(cli: &Cli, filename: &str, interrupted: &AtomicBool) -> Result<()> {
    if Container::is_compiled_file(filename) {
        let container = Container::from_bytes(&fs::read(filename)?)?;
        print!("{}", container);
        return Ok(());
    }
    let program = Program::new(&fs::read_to_string(filename)?);
    if cli.compile.is_some() || cli.list {
        let container = compile(&program)?;
        if let Some(out) = &cli.compile {
            container.write_to(&mut File::create(out)?)?;
            log::info!("wrote {} bytes of code to {}", container.code_len(), out);
        }
        if cli.list {
            print!("{}", container);
        }
        return Ok(());
    }
    let mut interpreter = Interpreter::new(program);
    interpreter.set_trace(cli.trace);
    let start = Instant::now();
    let stdout = std::io::stdout();
    execute(&mut interpreter, interrupted, |args| stdout.lock().write_fmt(args))?;
    print!("{}", interpreter.variables());
    if cli.time {
        println!("{} ms", start.elapsed().as_millis());
    }
    Ok(())
}

fn execute<F>(interpreter: &mut Interpreter, interrupted: &AtomicBool, mut print: F) -> Result<()>
where
    F: FnMut(std::fmt::Arguments) -> std::io::Result<()>,
{
    loop {
        if interrupted.swap(false, Ordering::SeqCst) {
            interpreter.interrupt();
        }
        match interpreter.execute(5000) {
            Event::Running => {}
            Event::Trace(text) => {
                print(format_args!("{}\n{}", text, interpreter.variables()))?;
            }
            Event::Stopped => return Ok(()),
            Event::Errors(error) => return Err(error.into()),
        }
    }
}

fn main_loop(interrupted: &AtomicBool) -> Result<()> {
    let interface = Interface::new("barebones")?;
    interface.set_prompt("] ")?;
    let mut source = String::new();
    let mut trace = false;

    loop {
        let line = match interface.read_line()? {
            ReadResult::Input(line) => line,
            ReadResult::Signal(_) | ReadResult::Eof => break,
        };
        let mut words = line.split_whitespace();
        let command = words.next().map(|w| w.to_ascii_uppercase());
        let outcome: Result<()> = match command.as_deref() {
            Some("RUN") => {
                let mut interpreter = Interpreter::from_source(&source);
                interpreter.set_trace(trace);
                interrupted.store(false, Ordering::SeqCst);
                execute(&mut interpreter, interrupted, |args| interface.write_fmt(args))
                    .and_then(|_| {
                        interface.write_fmt(format_args!("{}", interpreter.variables()))?;
                        Ok(())
                    })
            }
            Some("LIST") => interface
                .write_fmt(format_args!("{}", source))
                .map_err(|e| e.into()),
            Some("NEW") => {
                source.clear();
                Ok(())
            }
            Some("TRACE") => {
                trace = !trace;
                let state = if trace { "ON" } else { "OFF" };
                interface
                    .write_fmt(format_args!("TRACE {}\n", state))
                    .map_err(|e| e.into())
            }
            Some("COMPILE") => match words.next() {
                Some(path) => compile(&Program::new(&source))
                    .map_err(|e| e.into())
                    .and_then(|container| {
                        container.write_to(&mut File::create(path)?)?;
                        Ok(())
                    }),
                None => interface
                    .write_fmt(format_args!("COMPILE needs a file name\n"))
                    .map_err(|e| e.into()),
            },
            _ => {
                source.push_str(&line);
                source.push('\n');
                interface.add_history_unique(line);
                Ok(())
            }
        };
        if let Err(error) = outcome {
            interface.write_fmt(format_args!(
                "{}\n",
                Style::new().bold().paint(error.to_string())
            ))?;
        }
    }
    Ok(())
}
