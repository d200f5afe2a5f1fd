use std::iter::Peekable;

use indexmap::IndexSet;
use log::{debug, trace, warn};

use crate::{
    ast::SetOperator,
    error::SetError,
    sets::{
        SetAlgebraEngine,
        element::{dedup, format_elements},
        lexer::{Token, tokenize},
        registry::{StoredSet, TEMP_PREFIX, is_temp},
        result::{Evaluation, Narration, RelationEvaluation, SetResult, SetValue},
    },
};

/// Converts infix tokens to postfix order with the shunting-yard algorithm.
///
/// `ᶜ` is emitted as soon as it follows an operand or a closing parenthesis,
/// so it always applies to exactly what precedes it. Binary operators pop
/// operators of greater or equal precedence (`⊆` < `∪ Δ` < `∩ -`).
///
/// # Errors
/// Returns `SetError::MalformedExpression` for unbalanced parentheses.
///
/// # Example
/// ```
/// use discreta::sets::{expression::to_postfix, lexer::tokenize};
///
/// let postfix = to_postfix(&tokenize("A ∪ B ∩ Cᶜ").tokens).unwrap();
/// let text: Vec<String> = postfix.iter().map(ToString::to_string).collect();
/// assert_eq!(text.join(" "), "A B C ᶜ ∩ ∪");
/// ```
pub fn to_postfix(tokens: &[Token]) -> Result<Vec<Token>, SetError> {
    let unbalanced = || SetError::MalformedExpression { details: "unbalanced parentheses".to_string() };

    let mut output = Vec::with_capacity(tokens.len());
    let mut operators: Vec<&Token> = Vec::new();
    let mut iter = tokens.iter().peekable();

    while let Some(token) = iter.next() {
        match token {
            Token::Set(_) => {
                output.push(token.clone());
                take_complement(&mut iter, &mut output);
            },
            Token::LParen => operators.push(token),
            Token::RParen => {
                loop {
                    match operators.pop() {
                        Some(Token::LParen) => break,
                        Some(op) => output.push(op.clone()),
                        None => return Err(unbalanced()),
                    }
                }
                take_complement(&mut iter, &mut output);
            },
            Token::Complement => output.push(token.clone()),
            _ => {
                let Some(op) = token.operator() else {
                    continue;
                };
                while let Some(&top) = operators.last()
                      && let Some(top_op) = top.operator()
                      && top_op.precedence() >= op.precedence()
                {
                    output.push(top.clone());
                    operators.pop();
                }
                operators.push(token);
            },
        }
    }

    while let Some(op) = operators.pop() {
        if *op == Token::LParen {
            return Err(unbalanced());
        }
        output.push(op.clone());
    }

    Ok(output)
}

fn take_complement<'a, I>(iter: &mut Peekable<I>, output: &mut Vec<Token>)
    where I: Iterator<Item = &'a Token>
{
    if let Some(Token::Complement) = iter.peek() {
        iter.next();
        output.push(Token::Complement);
    }
}

fn stack_labels(engine: &SetAlgebraEngine, stack: &[String]) -> String {
    stack.iter()
         .map(|name| engine.label(name))
         .collect::<Vec<_>>()
         .join(", ")
}

impl SetAlgebraEngine {
    /// Evaluates an infix set expression such as `A ∪ (B ∩ C)ᶜ` or `A ⊆ B`.
    ///
    /// Set names are single uppercase letters. Precedence, loosest first:
    /// `⊆`, then `∪` and `Δ`, then `∩` and `-`, then the postfix `ᶜ`. A `⊆`
    /// ends the evaluation with a relation result, so it must be the last
    /// operator applied.
    ///
    /// `ᶜ` is taken relative to the set named `U` when there is one. Otherwise
    /// the only other set is used, or the union of all other finite sets is
    /// registered as `U`. When that union is empty the last other set is used
    /// instead. A complement with no other set at all has no universe.
    ///
    /// In step-by-step mode the evaluation never fails: undefined sets are
    /// registered as empty, leftover values are combined by union, and
    /// errors are reported in [`Evaluation::error`] with an empty result.
    /// Intermediate results never outlive the call.
    ///
    /// # Errors
    /// Outside step-by-step mode:
    /// - `SetError::UndefinedSets` if the expression names unregistered sets.
    /// - `SetError::MalformedExpression` for unbalanced parentheses, missing
    ///   operands or an expression that does not reduce to one value.
    /// - `SetError::NoUniverse` if a complement has nothing to refer to.
    ///
    /// # Example
    /// ```
    /// use discreta::sets::{SetAlgebraEngine, result::RelationEvaluation};
    ///
    /// let mut engine = SetAlgebraEngine::new();
    /// engine.add_set_from_literal("A", "1, 2, 3").unwrap();
    /// engine.add_set_from_literal("B", "2, 3, 4").unwrap();
    ///
    /// let both = engine.evaluate_expression("A ∩ B").unwrap();
    /// assert_eq!(both.result.representation(), "{2, 3}");
    ///
    /// let subset = engine.evaluate_expression("A ⊆ B").unwrap();
    /// assert_eq!(subset.result.evaluation(), Some(RelationEvaluation::False));
    /// ```
    pub fn evaluate_expression(&mut self, expression: &str) -> Result<Evaluation, SetError> {
        let mut steps = Narration::new(self.step_by_step);
        let outcome = self.evaluate_infix(expression, &mut steps);
        self.purge_temps();

        match outcome {
            Ok(result) => Ok(Evaluation::new(result, steps.into_steps())),
            Err(e) if self.step_by_step => {
                warn!("expression '{expression}' failed in step-by-step mode: {e}");
                steps.note("Evaluation error",
                           format!("An error occurred: {e}\nAn empty set is returned as the result."));
                Ok(Evaluation { result: SetResult::empty(),
                                steps:  steps.into_steps(),
                                error:  Some(e.to_string()), })
            },
            Err(e) => Err(e),
        }
    }

    fn purge_temps(&mut self) {
        if self.registry.purge_temps() > 0 {
            self.clear_cache();
        }
    }

    fn evaluate_infix(&mut self, expression: &str, steps: &mut Narration) -> Result<SetResult, SetError> {
        steps.note("Tokenize the expression",
                   format!("Original expression: {expression}\nEach symbol is identified as an individual token."));

        let lexed = tokenize(expression);
        let shown: Vec<String> = lexed.tokens.iter().map(ToString::to_string).collect();
        steps.note("Identified tokens",
                   format!("Tokens: {}\nThis includes operands (sets), operators and parentheses.",
                           shown.join(" ")));
        if !lexed.ignored.is_empty() {
            steps.note("Ignored symbols",
                       format!("These symbols are not part of a set expression and were skipped: {}",
                               lexed.ignored.join(" ")));
        }

        if lexed.tokens.is_empty() {
            steps.note("Empty expression",
                       "The expression contains no sets or operators to process.");
            return Ok(SetResult::empty());
        }

        self.check_undefined(&lexed.tokens, steps)?;

        steps.note("Convert the expression to postfix notation",
                   "The shunting-yard algorithm rewrites the infix expression in postfix (reverse Polish) notation.");

        let has_operand = lexed.tokens.iter().any(|t| matches!(t, Token::Set(_)));
        let postfix = if !has_operand && self.step_by_step {
            Vec::new()
        } else {
            to_postfix(&lexed.tokens)?
        };

        let shown: Vec<String> = postfix.iter().map(ToString::to_string).collect();
        steps.note("Expression in postfix notation",
                   format!("Postfix: {}\nOperators now come after their operands, which makes evaluation straightforward.",
                           shown.join(" ")));

        self.evaluate_postfix(&postfix, steps)
    }

    fn check_undefined(&mut self, tokens: &[Token], steps: &mut Narration) -> Result<(), SetError> {
        let undefined: IndexSet<String> = tokens.iter()
                                                .filter_map(|t| match t {
                                                    Token::Set(name) if !self.registry.contains(name) => Some(name.clone()),
                                                    _ => None,
                                                })
                                                .collect();

        if undefined.is_empty() {
            return Ok(());
        }

        if !self.step_by_step {
            return Err(SetError::UndefinedSets { names: undefined.into_iter().collect() });
        }

        steps.note("Undefined sets detected",
                   format!("These sets are not defined: {}\nThey need to be defined before they are used in an expression.",
                           undefined.iter().cloned().collect::<Vec<_>>().join(", ")));

        for name in undefined {
            warn!("set '{name}' is undefined; registering it as empty");
            self.add_set(&name, Vec::new())?;
            steps.note("Automatic set definition",
                       format!("The set {name} = ∅ was created automatically so the evaluation can continue."));
        }

        Ok(())
    }

    fn evaluate_postfix(&mut self, postfix: &[Token], steps: &mut Narration) -> Result<SetResult, SetError> {
        let mut stack: Vec<String> = Vec::new();
        let mut temps = 0usize;
        let mut step = 1usize;

        steps.note("Start postfix evaluation",
                   "Each token of the postfix expression is processed from left to right.");

        for token in postfix {
            match token {
                Token::Set(name) => {
                    stack.push(name.clone());
                    steps.note(format!("Step {step}: Process operand {name}"),
                               format!("Push the set {name} onto the stack.\nCurrent stack: [{}]",
                                       stack_labels(self, &stack)));
                    step += 1;
                },
                Token::Complement => {
                    let set = stack.pop().ok_or_else(|| SetError::MalformedExpression { details: "missing operand for the complement".to_string() })?;
                    let universe = self.select_universe(&set, steps)?;
                    let (set_label, universe_label) = (self.label(&set), self.label(&universe));

                    steps.note(format!("Step {step}: Compute the complement of {set_label}"),
                               format!("Pop {set_label} from the stack.\nThe complement is taken relative to the universe {universe_label}.\nFormula: {universe_label} - {set_label}"));
                    step += 1;

                    let value = self.apply(SetOperator::Complement, &set, &universe, &mut Narration::default())?;
                    let temp = self.store_temp(&mut temps, value)?;
                    steps.note("Result of the complement",
                               format!("{set_label}ᶜ = {}\nThe result is stored and pushed onto the stack.",
                                       self.describe_value(&temp)));

                    stack.push(temp);
                    steps.note("Current stack", format!("Stack: [{}]", stack_labels(self, &stack)));
                },
                _ => {
                    let Some(op) = token.operator() else {
                        return Err(SetError::MalformedExpression { details: format!("unexpected '{token}'") });
                    };
                    let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                        return Err(SetError::MalformedExpression { details: format!("missing operands for {op}") });
                    };
                    let (la, lb) = (self.label(&a), self.label(&b));

                    steps.note(format!("Step {step}: Compute the {}", op.name()),
                               format!("Pop two operands from the stack: {la} and {lb}.\nCompute {la} {op} {lb}"));
                    step += 1;

                    let value = self.apply(op, &a, &b, &mut Narration::default())?;

                    if let SetValue::Relation { representation, evaluation } = &value {
                        let answer = match evaluation {
                            RelationEvaluation::True => "Yes",
                            RelationEvaluation::False => "No",
                            RelationEvaluation::Indeterminate => "It cannot be determined",
                        };
                        steps.note("Result of the subset relation",
                                   format!("Is {la} a subset of {lb}? {answer}\n{representation}"));
                        return Ok(value.to_result());
                    }

                    let temp = self.store_temp(&mut temps, value)?;
                    steps.note(format!("Result of the {}", op.name()),
                               format!("{la} {op} {lb} = {}", self.describe_value(&temp)));

                    stack.push(temp);
                    steps.note("Current stack", format!("Stack: [{}]", stack_labels(self, &stack)));
                },
            }
        }

        if stack.len() != 1 {
            self.recover_stack(&mut stack, &mut temps, steps)?;
        }

        let Some(last) = stack.pop() else {
            return Err(SetError::MalformedExpression { details: "the evaluation produced no value".to_string() });
        };

        steps.note("Finish the evaluation",
                   format!("The expression has been fully evaluated.\nFinal value on the stack: {}",
                           self.label(&last)));

        let result = self.registry
                         .get(&last)
                         .map(|set| SetValue::from(set).to_result())
                         .ok_or_else(|| SetError::UnknownSet { name: last.clone() })?;

        let kind = match &result {
            SetResult::Finite { .. } => "Finite set",
            SetResult::Infinite { .. } => "Infinite set",
            SetResult::Relation { .. } => "Relation",
        };
        steps.note("Final result", format!("{kind}: {}", result.representation()));

        Ok(result)
    }

    /// Reduces a stack that does not hold exactly one value. Outside
    /// step-by-step mode this is an error.
    fn recover_stack(&mut self,
                     stack: &mut Vec<String>,
                     temps: &mut usize,
                     steps: &mut Narration)
                     -> Result<(), SetError> {
        if !self.step_by_step {
            return Err(SetError::MalformedExpression { details: "the evaluation did not produce a single value".to_string() });
        }

        warn!("set expression left {} values on the stack; recovering", stack.len());
        steps.note("Problem detected in the evaluation",
                   format!("The evaluation produced {} values instead of one.\nThis usually means an operator is missing or left over.",
                           stack.len()));

        if stack.is_empty() {
            let temp = self.store_temp(temps, SetValue::Finite(Vec::new()))?;
            stack.push(temp);
            steps.note("Empty stack", "There is no value on the stack. The empty set is used as the result.");
            return Ok(());
        }

        steps.note("Recovery: combining results",
                   format!("The {} sets are combined with union to obtain a single result.",
                           stack.len()));

        while stack.len() > 1 {
            let (Some(b), Some(a)) = (stack.pop(), stack.pop()) else {
                break;
            };
            let (la, lb) = (self.label(&a), self.label(&b));

            let value = match self.apply(SetOperator::Union, &a, &b, &mut Narration::default()) {
                Ok(value) => value,
                Err(e) => {
                    steps.note("Error while combining",
                               format!("{la} and {lb} could not be combined ({e}). The empty set is used instead."));
                    SetValue::Finite(Vec::new())
                },
            };

            let temp = self.store_temp(temps, value)?;
            steps.note("Combining sets", format!("{la} ∪ {lb} = {}", self.describe_value(&temp)));
            stack.push(temp);
        }

        Ok(())
    }

    /// Picks the set a complement is taken against.
    fn select_universe(&mut self, operand: &str, steps: &mut Narration) -> Result<String, SetError> {
        if self.registry.contains("U") {
            return Ok("U".to_string());
        }

        let others: Vec<String> = self.registry
                                       .names()
                                       .filter(|name| !is_temp(name) && *name != operand)
                                       .map(str::to_string)
                                       .collect();

        match others.as_slice() {
            [] => Err(SetError::NoUniverse),
            [only] => Ok(only.clone()),
            [.., last] => {
                let elements = dedup(others.iter()
                                           .filter_map(|name| self.registry.finite(name))
                                           .flat_map(|elements| elements.iter().cloned())
                                           .collect());
                if elements.is_empty() {
                    return Ok(last.clone());
                }

                debug!("universe U synthesised from {} sets", others.len());
                steps.note("Creating the universe U",
                           format!("The universe U = {} was created automatically as the union of every existing set.",
                                   format_elements(&elements)));
                self.add_set("U", elements)?;
                Ok("U".to_string())
            },
        }
    }

    /// Registers an intermediate value under a fresh temporary name.
    fn store_temp(&mut self, counter: &mut usize, value: SetValue) -> Result<String, SetError> {
        let name = format!("{TEMP_PREFIX}{counter}");
        *counter += 1;

        let set = value.into_stored().ok_or_else(|| SetError::MalformedExpression { details: "a relation cannot be combined with further operators".to_string() })?;
        trace!("stored intermediate result as '{name}'");
        self.registry.insert(&name, set);
        self.clear_cache();
        Ok(name)
    }

    /// The contents of a registered set as shown in a step.
    fn describe_value(&self, name: &str) -> String {
        match self.registry.get(name) {
            Some(StoredSet::Finite(elements)) if elements.is_empty() => "∅".to_string(),
            Some(StoredSet::Finite(elements)) => format_elements(&elements),
            Some(StoredSet::Infinite(set)) => set.representation,
            None => name.to_string(),
        }
    }
}
