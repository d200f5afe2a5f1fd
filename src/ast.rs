use std::fmt::{self, Display};

/// A binary connective of propositional logic.
///
/// Each connective accepts several spellings on input (`∧` or `&&`, `→`, `⇒`
/// or `->`, ...); the lexer folds them into one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LogicOperator {
    /// Conjunction `∧`.
    And,
    /// Disjunction `∨`.
    Or,
    /// Exclusive or `⊕`.
    Xor,
    /// Material implication `→`.
    Implies,
    /// Biconditional `↔`.
    Iff,
}

impl LogicOperator {
    /// Applies the connective to two truth values.
    ///
    /// # Example
    /// ```
    /// use discreta::ast::LogicOperator;
    ///
    /// assert!(!LogicOperator::Implies.apply(true, false));
    /// assert!(LogicOperator::Implies.apply(false, false));
    /// assert!(LogicOperator::Iff.apply(false, false));
    /// assert!(LogicOperator::Xor.apply(true, false));
    /// ```
    #[must_use]
    pub const fn apply(self, left: bool, right: bool) -> bool {
        match self {
            Self::And => left && right,
            Self::Or => left || right,
            Self::Xor => left != right,
            Self::Implies => !left || right,
            Self::Iff => left == right,
        }
    }

    /// The canonical symbol used when printing formulas.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::And => "∧",
            Self::Or => "∨",
            Self::Xor => "⊕",
            Self::Implies => "→",
            Self::Iff => "↔",
        }
    }
}

impl Display for LogicOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// A parsed propositional formula.
///
/// Positions are 1-based character offsets into the source the node was parsed
/// from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogicExpr {
    /// A propositional variable such as `p`.
    Variable {
        /// Name of the variable (a run of ASCII letters).
        name:     String,
        /// Position in the source text.
        position: usize,
    },
    /// Negation of a sub-formula.
    Not {
        /// The negated formula.
        expr:     Box<Self>,
        /// Position in the source text.
        position: usize,
    },
    /// A binary connective.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The connective.
        op:       LogicOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the connective in the source text.
        position: usize,
    },
}

impl Display for LogicExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Variable { name, .. } => write!(f, "{name}"),
            Self::Not { expr, .. } => match expr.as_ref() {
                Self::Binary { .. } => write!(f, "¬({expr})"),
                _ => write!(f, "¬{expr}"),
            },
            Self::Binary { left, op, right, .. } => write!(f, "({left} {op} {right})"),
        }
    }
}

/// A binary arithmetic operator of a succession formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticOperator {
    /// `+`
    Add,
    /// `-`
    Sub,
    /// `*`
    Mul,
    /// `/`
    Div,
    /// `%` (remainder with the sign of the dividend)
    Rem,
    /// `^` or `**` (right-associative)
    Pow,
}

impl ArithmeticOperator {
    /// Binding strength used when printing; larger binds tighter.
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Add | Self::Sub => 1,
            Self::Mul | Self::Div | Self::Rem => 2,
            Self::Pow => 4,
        }
    }

    /// Applies the operator with IEEE-754 semantics.
    #[must_use]
    pub fn apply(self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Sub => left - right,
            Self::Mul => left * right,
            Self::Div => left / right,
            Self::Rem => left % right,
            Self::Pow => left.powf(right),
        }
    }
}

impl Display for ArithmeticOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let symbol = match self {
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Rem => "%",
            Self::Pow => "^",
        };
        write!(f, "{symbol}")
    }
}

/// A one-argument function usable inside a succession formula.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MathFunction {
    /// Square root.
    Sqrt,
    /// Sine (radians).
    Sin,
    /// Cosine (radians).
    Cos,
    /// Tangent (radians).
    Tan,
    /// Base-10 logarithm.
    Log,
    /// Natural logarithm.
    Ln,
}

impl MathFunction {
    /// Looks a function up by the name written in the formula.
    ///
    /// # Example
    /// ```
    /// use discreta::ast::MathFunction;
    ///
    /// assert_eq!(MathFunction::from_name("ln"), Some(MathFunction::Ln));
    /// assert_eq!(MathFunction::from_name("exp"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sqrt" => Some(Self::Sqrt),
            "sin" => Some(Self::Sin),
            "cos" => Some(Self::Cos),
            "tan" => Some(Self::Tan),
            "log" => Some(Self::Log),
            "ln" => Some(Self::Ln),
            _ => None,
        }
    }

    /// The name as written in a formula.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sqrt => "sqrt",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Log => "log",
            Self::Ln => "ln",
        }
    }

    /// Evaluates the function.
    #[must_use]
    pub fn apply(self, x: f64) -> f64 {
        match self {
            Self::Sqrt => x.sqrt(),
            Self::Sin => x.sin(),
            Self::Cos => x.cos(),
            Self::Tan => x.tan(),
            Self::Log => x.log10(),
            Self::Ln => x.ln(),
        }
    }
}

/// A parsed arithmetic formula in the single bound variable `k`.
#[derive(Debug, Clone, PartialEq)]
pub enum Formula {
    /// A numeric literal.
    Number {
        /// The literal value.
        value:    f64,
        /// Position in the source text.
        position: usize,
    },
    /// The bound variable `k`.
    Variable {
        /// Position in the source text.
        position: usize,
    },
    /// Unary minus.
    Negate {
        /// The negated formula.
        expr:     Box<Self>,
        /// Position in the source text.
        position: usize,
    },
    /// A binary operation.
    Binary {
        /// Left operand.
        left:     Box<Self>,
        /// The operator.
        op:       ArithmeticOperator,
        /// Right operand.
        right:    Box<Self>,
        /// Position of the operator in the source text.
        position: usize,
    },
    /// A call to one of the builtin functions.
    Call {
        /// The called function.
        function: MathFunction,
        /// Its single argument.
        argument: Box<Self>,
        /// Position of the function name in the source text.
        position: usize,
    },
}

impl Formula {
    /// Precedence of the node when it appears as an operand.
    const fn binding(&self) -> u8 {
        match self {
            Self::Binary { op, .. } => op.precedence(),
            Self::Negate { .. } => 3,
            _ => 5,
        }
    }

    /// Evaluates the formula for a given value of `k`.
    ///
    /// # Example
    /// ```
    /// use discreta::succession::parse_formula;
    ///
    /// let formula = parse_formula("2 * k ^ 2 + 1").unwrap();
    /// assert_eq!(formula.evaluate(3.0), 19.0);
    /// ```
    #[must_use]
    pub fn evaluate(&self, k: f64) -> f64 {
        match self {
            Self::Number { value, .. } => *value,
            Self::Variable { .. } => k,
            Self::Negate { expr, .. } => -expr.evaluate(k),
            Self::Binary { left, op, right, .. } => op.apply(left.evaluate(k), right.evaluate(k)),
            Self::Call { function, argument, .. } => function.apply(argument.evaluate(k)),
        }
    }
}

impl Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number { value, .. } => write!(f, "{value}"),
            Self::Variable { .. } => write!(f, "k"),
            Self::Negate { expr, .. } => {
                if expr.binding() < 5 {
                    write!(f, "-({expr})")
                } else {
                    write!(f, "-{expr}")
                }
            },
            Self::Binary { left, op, right, .. } => {
                let prec = op.precedence();
                // `^` groups to the right, everything else to the left.
                let (left_needs, right_needs) = if matches!(op, ArithmeticOperator::Pow) {
                    (left.binding() <= prec, right.binding() < prec)
                } else {
                    (left.binding() < prec, right.binding() <= prec)
                };
                if left_needs {
                    write!(f, "({left})")?;
                } else {
                    write!(f, "{left}")?;
                }
                write!(f, " {op} ")?;
                if right_needs {
                    write!(f, "({right})")
                } else {
                    write!(f, "{right}")
                }
            },
            Self::Call { function, argument, .. } => {
                write!(f, "{}({argument})", function.name())
            },
        }
    }
}

/// An operator of the set-algebra expression language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SetOperator {
    /// `∪`
    Union,
    /// `∩`
    Intersection,
    /// `-`
    Difference,
    /// `Δ`
    SymmetricDifference,
    /// Postfix `ᶜ`, relative to a universe.
    Complement,
    /// `⊆`, yields a relation instead of a set.
    Subset,
}

impl SetOperator {
    /// Shunting-yard precedence; larger binds tighter.
    ///
    /// # Example
    /// ```
    /// use discreta::ast::SetOperator;
    ///
    /// assert!(SetOperator::Intersection.precedence() > SetOperator::Union.precedence());
    /// assert!(SetOperator::Union.precedence() > SetOperator::Subset.precedence());
    /// ```
    #[must_use]
    pub const fn precedence(self) -> u8 {
        match self {
            Self::Subset => 1,
            Self::Union | Self::SymmetricDifference => 2,
            Self::Intersection | Self::Difference => 3,
            Self::Complement => 4,
        }
    }

    /// The symbol used in expressions.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::Union => "∪",
            Self::Intersection => "∩",
            Self::Difference => "-",
            Self::SymmetricDifference => "Δ",
            Self::Complement => "ᶜ",
            Self::Subset => "⊆",
        }
    }

    /// A human-readable name for explanation steps.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Union => "union",
            Self::Intersection => "intersection",
            Self::Difference => "difference",
            Self::SymmetricDifference => "symmetric difference",
            Self::Complement => "complement",
            Self::Subset => "subset",
        }
    }
}

impl Display for SetOperator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
