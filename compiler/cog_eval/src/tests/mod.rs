//! Evaluator tests that run whole scripts, plus shared helpers.

mod control_tests;
mod operators_tests;
mod unary_operators_tests;

use crate::{
    buffer_handler, compile, define_native, print_native, Budget, Exception, Frame, Outcome,
    Program, Value, DEFAULT_MAX_CALL_DEPTH,
};

pub(crate) fn compile_source(source: &str) -> Program {
    let ast = cog_parse::parse(source).expect("source parses");
    compile(&ast).expect("source compiles")
}

/// Result of running a script to completion with a buffering `print`.
pub(crate) struct Run {
    pub outcome: Outcome,
    pub output: Vec<String>,
    pub global: Frame,
    pub executed: u64,
}

impl Run {
    pub fn value(self) -> Value {
        match self.outcome {
            Outcome::Completed(value) => value,
            other => panic!("script did not complete: {other:?}"),
        }
    }

    pub fn exception(self) -> Exception {
        match self.outcome {
            Outcome::Unhandled(exception) => exception,
            other => panic!("expected an uncaught exception, got {other:?}"),
        }
    }

    pub fn global(&self, name: &str) -> Value {
        self.global
            .get_local(name)
            .unwrap_or_else(|| panic!("no global named {name}"))
    }
}

pub(crate) fn run_with(source: &str, mut budget: Budget) -> Run {
    let program = compile_source(source);
    let global = Frame::global();
    let output = buffer_handler();
    define_native(&global, "print", false, print_native(output.clone()));
    let outcome = program.execute(&global, &mut budget, DEFAULT_MAX_CALL_DEPTH);
    Run {
        outcome,
        output: output.lines(),
        global,
        executed: budget.executed(),
    }
}

pub(crate) fn run(source: &str) -> Run {
    run_with(source, Budget::unlimited())
}

/// Value of the last statement.
pub(crate) fn eval(source: &str) -> Value {
    run(source).value()
}

/// Message of the exception the script ends with.
pub(crate) fn eval_err(source: &str) -> String {
    run(source).exception().message()
}
