/// Errors raised while executing a postfix program.
///
/// None of these can occur for a program produced by the parser and run
/// against the registry it was parsed with; they guard the stack machine
/// against hand-built or mismatched programs.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The stack underflowed, or did not end with exactly one value.
    #[error("Invalid instruction sequence: {details}.")]
    InvalidInstructionSequence {
        /// What went wrong with the stack.
        details: String,
    },
    /// The program calls a function the registry does not know.
    #[error("Function {name} is not registered.")]
    UnregisteredFunction {
        /// The function name carried by the instruction.
        name: String,
    },
}
