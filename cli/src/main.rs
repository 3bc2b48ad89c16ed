mod highlighter;
mod lexer;
mod validator;

use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use reedline::{
    DefaultCompleter, DefaultPrompt, DefaultPromptSegment, DescriptionMode, EditCommand, Emacs,
    FileBackedHistory, IdeMenu, KeyCode, KeyModifiers, Keybindings, MenuBuilder, Reedline,
    ReedlineEvent, ReedlineMenu, Signal, default_emacs_keybindings,
};
use sprig::{
    Bump, ExecutionOptions, Interpreter, InterpreterOptions, ParserOptions, parser, render_error,
};
use std::io::BufRead;
use std::io::BufReader;
use std::path::PathBuf;

use crate::highlighter::Highlighter;
use crate::lexer::calculate_depth;
use crate::validator::ParenValidator;

const HISTORY_FILE: &str = ".sprig_history";
const HISTORY_SIZE: usize = 1000;
const KEYWORDS: &[&str] = &[
    "if", "define", "set", "let", "lambda", "quote", "nil", "true", "false",
];

/// Sprig - a small Lisp interpreter
#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(about = "Evaluate sprig expressions", long_about = None)]
struct Args {
    /// Print the parsed AST (for debugging)
    #[arg(long)]
    debug_parse: bool,

    /// Reject input with anything after the first form
    #[arg(long)]
    strict: bool,

    /// Discard all definitions after an error
    #[arg(long)]
    reset_on_error: bool,

    /// Maximum nesting depth for both parsing and evaluation
    #[arg(long, default_value_t = 256)]
    max_depth: usize,

    /// Run every form of a source file
    #[arg(long, short)]
    file: Option<PathBuf>,

    /// Expression to evaluate (if not provided, reads from stdin)
    expression: Option<String>,
}

impl Args {
    fn options(&self) -> InterpreterOptions {
        InterpreterOptions {
            parser: ParserOptions {
                max_depth: self.max_depth,
                strict: self.strict,
            },
            execution: ExecutionOptions {
                max_depth: self.max_depth,
            },
            reset_on_error: self.reset_on_error,
        }
    }
}

fn add_menu_keybindings(keybindings: &mut Keybindings) {
    keybindings.add_binding(
        KeyModifiers::NONE,
        KeyCode::Tab,
        ReedlineEvent::UntilFound(vec![
            ReedlineEvent::Menu("completion_menu".to_string()),
            ReedlineEvent::MenuNext,
        ]),
    );
    keybindings.add_binding(
        KeyModifiers::ALT,
        KeyCode::Enter,
        ReedlineEvent::Edit(vec![EditCommand::InsertNewline]),
    );
}

fn setup_reedline(interpreter: &Interpreter) -> (Reedline, DefaultPrompt) {
    let mut words: Vec<String> = KEYWORDS.iter().map(|word| word.to_string()).collect();
    words.extend(interpreter.env().global_names());

    let completer = Box::new({
        let mut completions =
            DefaultCompleter::with_inclusions(&['-', '_', '+', '*', '/', '<', '>', '=']);
        completions.insert(words);
        completions
    });

    // Use the interactive menu to select options from the completer
    let ide_menu = IdeMenu::default()
        .with_name("completion_menu")
        .with_min_completion_width(0)
        .with_max_completion_width(50)
        .with_max_completion_height(u16::MAX)
        .with_padding(0)
        .with_cursor_offset(0)
        .with_description_mode(DescriptionMode::PreferRight)
        .with_min_description_width(0)
        .with_max_description_width(50)
        .with_description_offset(1)
        .with_correct_cursor_pos(false);

    let completion_menu = Box::new(ide_menu);

    let mut keybindings = default_emacs_keybindings();
    add_menu_keybindings(&mut keybindings);

    let edit_mode = Box::new(Emacs::new(keybindings));

    let mut line_editor = Reedline::create()
        .with_highlighter(Box::new(Highlighter::new()))
        .with_validator(Box::new(ParenValidator))
        .with_completer(completer)
        .with_menu(ReedlineMenu::EngineCompleter(completion_menu))
        .with_edit_mode(edit_mode);

    let history = dirs::home_dir()
        .map(|home| home.join(HISTORY_FILE))
        .and_then(|path| FileBackedHistory::with_file(HISTORY_SIZE, path).ok());
    match history {
        Some(history) => line_editor = line_editor.with_history(Box::new(history)),
        None => tracing::warn!("history disabled: no usable home directory"),
    }

    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("sprig".to_string()),
        DefaultPromptSegment::Empty,
    );

    (line_editor, prompt)
}

/// Runs every form of `input`, printing the last value or the error.
/// Returns whether evaluation succeeded.
fn interpret_input(interpreter: &mut Interpreter, input: &str, debug_parse: bool) -> bool {
    if debug_parse {
        let arena = Bump::new();
        match parser::parse_all(&arena, input, interpreter.options().parser.clone()) {
            Ok(forms) => {
                println!("=== Parsed AST ===");
                for form in forms {
                    println!("{}", form.dump());
                }
                println!();
            }
            Err(e) => {
                render_error(&e.into(), input);
                return false;
            }
        }
    }

    match interpreter.eval_source(input) {
        Ok(value) => {
            println!("{}", value);
            true
        }
        Err(e) => {
            render_error(&e, input);
            false
        }
    }
}

fn run_once(interpreter: &mut Interpreter, source: &str, debug_parse: bool) -> Result<()> {
    if interpret_input(interpreter, source, debug_parse) {
        Ok(())
    } else {
        Err(miette!("evaluation failed"))
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging subscriber
    use tracing_subscriber::{EnvFilter, fmt};

    // Use SPRIG_LOG or RUST_LOG environment variable to control log level
    // Default to WARN if not set
    let filter = EnvFilter::try_from_env("SPRIG_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let mut interpreter = Interpreter::with_options(args.options());

    if let Some(path) = &args.file {
        let source = std::fs::read_to_string(path).into_diagnostic()?;
        return run_once(&mut interpreter, &source, args.debug_parse);
    }

    // Check if we have a direct expression argument
    if let Some(expr) = &args.expression {
        return run_once(&mut interpreter, expr, args.debug_parse);
    }

    // Otherwise, check if we're in interactive or pipe mode
    let is_interactive = atty::is(atty::Stream::Stdin);

    if is_interactive {
        // Interactive REPL mode
        let (mut line_editor, prompt) = setup_reedline(&interpreter);

        println!("Sprig REPL - Type expressions to evaluate (Ctrl+D or Ctrl+C to exit)");

        loop {
            let sig = match line_editor.read_line(&prompt) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("Reedline error: {e}");
                    return Ok(());
                }
            };

            match sig {
                Signal::Success(buffer) => {
                    if !buffer.trim().is_empty() {
                        interpret_input(&mut interpreter, &buffer, args.debug_parse);
                    }
                }
                Signal::CtrlD | Signal::CtrlC => {
                    println!("\nGoodbye!");
                    return Ok(());
                }
            }
        }
    } else {
        // Pipe/stdin mode: lines are joined until their parentheses balance
        let stdin = std::io::stdin();
        let reader = BufReader::new(stdin.lock());
        let mut pending = String::new();

        for line in reader.lines() {
            let line = match line {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("Error reading line from stdin: {}", e);
                    return Ok(());
                }
            };

            pending.push_str(&line);
            pending.push('\n');
            if calculate_depth(&pending) == Some(0) {
                if !pending.trim().is_empty() {
                    interpret_input(&mut interpreter, &pending, args.debug_parse);
                }
                pending.clear();
            }
        }

        // Whatever is left is unbalanced; let the parser report it.
        if !pending.trim().is_empty() {
            interpret_input(&mut interpreter, &pending, args.debug_parse);
        }
    }

    Ok(())
}
