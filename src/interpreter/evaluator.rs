use tracing::debug;

use crate::{
    error::EvalError,
    interpreter::{
        program::{Instruction, Program},
        registry::FunctionRegistry,
    },
};

/// Executes a postfix program on a value stack.
///
/// - A number is pushed.
/// - A binary operator pops the right operand, then the left one, and pushes
///   `left op right`.
/// - A function pops as many values as its arity and is called with them in
///   source order.
///
/// Division by zero follows IEEE semantics and is not an error.
///
/// # Parameters
/// - `program`: Postfix instruction sequence.
/// - `registry`: Functions the program may call.
///
/// # Returns
/// The single value left on the stack.
///
/// # Errors
/// - `InvalidInstructionSequence` if the stack underflows or does not end
///   with exactly one value.
/// - `UnregisteredFunction` if the program calls a name the registry does not
///   know.
///
/// # Example
/// ```
/// use exprcalc::{
///     ast::BinaryOperator,
///     interpreter::{
///         evaluator::evaluate,
///         program::{Instruction, Program},
///         registry::FunctionRegistry,
///     },
/// };
///
/// let program = Program(vec![Instruction::Number(2.0),
///                            Instruction::Number(3.0),
///                            Instruction::Function("POWER".to_string()),
///                            Instruction::Number(1.0),
///                            Instruction::Binary(BinaryOperator::Subtract)]);
///
/// assert_eq!(evaluate(&program, &FunctionRegistry::new()).unwrap(), 7.0);
/// ```
pub fn evaluate(program: &Program, registry: &FunctionRegistry) -> Result<f64, EvalError> {
    let mut eval_stack: Vec<f64> = Vec::with_capacity(program.len());

    for instruction in program.iter() {
        match instruction {
            Instruction::Number(value) => eval_stack.push(*value),
            Instruction::Binary(op) => {
                let right = pop(&mut eval_stack, instruction)?;
                let left = pop(&mut eval_stack, instruction)?;
                eval_stack.push(op.apply(left, right));
            },
            Instruction::Function(name) => {
                let function =
                    registry.lookup(name)
                            .ok_or_else(|| EvalError::UnregisteredFunction { name: name.clone() })?;
                let arity = function.arity();
                if eval_stack.len() < arity {
                    return Err(underflow(instruction));
                }
                let arguments = eval_stack.split_off(eval_stack.len() - arity);
                eval_stack.push(function.call(&arguments));
            },
        }
    }

    match eval_stack.as_slice() {
        [result] => {
            debug!(result, "evaluated program");
            Ok(*result)
        },
        values => {
            Err(EvalError::InvalidInstructionSequence { details: format!("expected one value on \
                                                                          the stack, found {}",
                                                                         values.len()), })
        },
    }
}

fn pop(eval_stack: &mut Vec<f64>, instruction: &Instruction) -> Result<f64, EvalError> {
    eval_stack.pop().ok_or_else(|| underflow(instruction))
}

fn underflow(instruction: &Instruction) -> EvalError {
    EvalError::InvalidInstructionSequence { details: format!("stack underflow at {instruction}") }
}
