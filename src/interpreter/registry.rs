use std::{collections::HashMap, fmt};

/// Type alias for builtin function implementations.
///
/// A builtin receives its evaluated arguments in source order; the slice
/// length always equals the registered arity.
pub type BuiltinFn = fn(&[f64]) -> f64;

/// A static table entry, turned into a [`RegisteredFunction`] on insertion.
struct BuiltinDef {
    name:  &'static str,
    arity: usize,
    func:  BuiltinFn,
}

/// A function the parser accepts and the evaluator can execute.
#[derive(Clone)]
pub struct RegisteredFunction {
    name:  String,
    arity: usize,
    func:  BuiltinFn,
}

impl RegisteredFunction {
    fn new(name: &str, arity: usize, func: BuiltinFn) -> Self {
        Self { name: name.to_ascii_uppercase(),
               arity,
               func }
    }

    /// Canonical upper-case name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Required argument count.
    #[must_use]
    pub const fn arity(&self) -> usize {
        self.arity
    }

    /// Calls the implementation. `args` must hold exactly `arity` values.
    #[must_use]
    pub fn call(&self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity, "{} called with wrong arity", self.name);
        (self.func)(args)
    }
}

impl fmt::Debug for RegisteredFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegisteredFunction")
         .field("name", &self.name)
         .field("arity", &self.arity)
         .finish_non_exhaustive()
    }
}

/// Defines a static table of builtin functions.
///
/// Each entry provides:
/// - an upper-case name,
/// - the arity,
/// - a function pointer implementing the builtin.
macro_rules! builtin_functions {
    (
        $table:ident {
            $(
                $name:literal => {
                    arity: $arity:expr,
                    func: $func:expr $(,)?
                }
            ),* $(,)?
        }
    ) => {
        static $table: &[BuiltinDef] = &[
            $(
                BuiltinDef { name: $name, arity: $arity, func: $func },
            )*
        ];
    };
}

builtin_functions! {
    STANDARD_FUNCTIONS {
        "POWER" => { arity: 2, func: |args| args[0].powf(args[1]) },
    }
}

builtin_functions! {
    SCIENTIFIC_FUNCTIONS {
        "MOD"     => { arity: 2, func: |args| args[0] % args[1] },
        "IDIVIDE" => { arity: 2, func: |args| (args[0] / args[1]).trunc() },
        "SQRT"    => { arity: 1, func: |args| args[0].sqrt() },
        "SIN"     => { arity: 1, func: |args| args[0].sin() },
        "COS"     => { arity: 1, func: |args| args[0].cos() },
        "TAN"     => { arity: 1, func: |args| args[0].tan() },
        "ASIN"    => { arity: 1, func: |args| args[0].asin() },
        "ACOS"    => { arity: 1, func: |args| args[0].acos() },
        "ATAN"    => { arity: 1, func: |args| args[0].atan() },
    }
}

/// The set of functions an expression may call.
///
/// A registry is an ordinary immutable value: build it once, then lend it to
/// any number of parsers and evaluators, on any number of threads. Names are
/// matched case-insensitively and stored in upper case.
///
/// # Example
/// ```
/// use exprcalc::interpreter::registry::FunctionRegistry;
///
/// let registry = FunctionRegistry::new();
/// assert!(registry.is_registered("power"));
/// assert_eq!(registry.lookup("Power").map(|f| f.arity()), Some(2));
/// assert!(registry.lookup("SQRT").is_none());
///
/// let extended = FunctionRegistry::new().with("HALF", 1, |args| args[0] / 2.0);
/// assert!(extended.is_registered("half"));
/// ```
#[derive(Debug, Clone)]
pub struct FunctionRegistry {
    functions: HashMap<String, RegisteredFunction>,
}

impl FunctionRegistry {
    /// Creates the standard registry, containing only `POWER(base, exponent)`.
    #[must_use]
    pub fn new() -> Self {
        Self::from_table(STANDARD_FUNCTIONS)
    }

    /// Creates a registry without any function.
    #[must_use]
    pub fn empty() -> Self {
        Self { functions: HashMap::new() }
    }

    /// Creates the standard registry extended with `MOD`, `IDIVIDE`, `SQRT`
    /// and the trigonometric functions `SIN`, `COS`, `TAN`, `ASIN`, `ACOS`,
    /// `ATAN`.
    #[must_use]
    pub fn scientific() -> Self {
        let mut registry = Self::new();
        registry.extend(SCIENTIFIC_FUNCTIONS);
        registry
    }

    /// Returns the registry with one more function. An existing entry with
    /// the same (case-insensitive) name is replaced.
    #[must_use]
    pub fn with(mut self, name: &str, arity: usize, func: BuiltinFn) -> Self {
        self.insert(RegisteredFunction::new(name, arity, func));
        self
    }

    /// Tests whether `name` is registered, ignoring case.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.functions.contains_key(&name.to_ascii_uppercase())
    }

    /// Looks a function up by name, ignoring case.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&RegisteredFunction> {
        self.functions.get(&name.to_ascii_uppercase())
    }

    /// Canonical names of all registered functions, sorted.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        let mut names = self.functions.keys().map(String::as_str).collect::<Vec<_>>();
        names.sort_unstable();
        names
    }

    fn from_table(table: &[BuiltinDef]) -> Self {
        let mut registry = Self::empty();
        registry.extend(table);
        registry
    }

    fn extend(&mut self, table: &[BuiltinDef]) {
        for def in table {
            self.insert(RegisteredFunction::new(def.name, def.arity, def.func));
        }
    }

    fn insert(&mut self, function: RegisteredFunction) {
        self.functions.insert(function.name.clone(), function);
    }
}

impl Default for FunctionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
