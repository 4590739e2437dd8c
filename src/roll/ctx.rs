use super::{
    error::RollError,
    roller::Roller,
    trace::{LogTracer, Step, Tracer},
    tree::*,
    RResult,
};
use crate::common::*;
use crate::ops::{self, Operand, Operate, Operator, Total};
use crate::parse::{
    ast,
    visit::{self, Accept},
};

pub type DefaultRoller = rand::rngs::ThreadRng;

pub const DEFAULT_MAX_ROLLS: usize = 1000;

/// Evaluates parsed expressions.
///
/// Holds the random source, the tracer that sees every step, and an
/// optional limit on how many dice one expression may roll.
pub struct RollContext<R = DefaultRoller, T = LogTracer> {
    max_rolls: Option<usize>,
    rolls: usize,
    roller: R,
    tracer: T,
}

impl<R: Roller> RollContext<R> {
    pub fn new(max_rolls: Option<usize>, roller: R) -> Self {
        Self {
            max_rolls,
            rolls: 0,
            roller,
            tracer: LogTracer,
        }
    }

    pub fn new_bounded(max_rolls: usize, roller: R) -> Self {
        Self::new(Some(max_rolls), roller)
    }

    pub fn new_unbounded(roller: R) -> Self {
        Self::new(None, roller)
    }
}

impl<R: Roller, T: Tracer> RollContext<R, T> {
    pub fn with_tracer<U: Tracer>(self, tracer: U) -> RollContext<R, U> {
        RollContext {
            max_rolls: self.max_rolls,
            rolls: self.rolls,
            roller: self.roller,
            tracer,
        }
    }

    pub fn max_rolls(&self) -> Option<usize> {
        self.max_rolls
    }

    /// Dice rolled by the expression currently or last evaluated.
    pub fn rolls(&self) -> usize {
        self.rolls
    }

    fn count_rolls(&mut self, n: usize) -> RResult<()> {
        self.rolls = self.rolls.saturating_add(n);
        if self.max_rolls.map_or(false, |max| self.rolls > max) {
            Err(RollError::TooManyRolls)
        } else {
            Ok(())
        }
    }

    pub fn roll_dice(&mut self, dice: &ast::Dice) -> RResult<Dice> {
        let count = dice.rolls.get() as usize;
        self.count_rolls(count)?;

        let mut results = vec1![self.roller.roll(dice.sides)];
        for _ in 1..count {
            results.push(self.roller.roll(dice.sides));
        }
        let total = ops::total(&results)?;

        let ret = Dice::new(*dice, results, total);
        self.tracer.trace(&Step::Rolled(&ret));
        Ok(ret)
    }

    /// Evaluates `expr`. Every dice term is rolled afresh, so evaluating the
    /// same expression twice gives two independent rolls.
    pub fn eval<'a>(&mut self, expr: &ast::Expression<'a>) -> RResult<Roll<'a>> {
        self.rolls = 0;
        let tree = expr.root().accept(self)?;
        Ok(Roll::new(expr.text(), tree))
    }
}

impl Default for RollContext {
    fn default() -> Self {
        Self::new(Some(DEFAULT_MAX_ROLLS), rand::thread_rng())
    }
}

fn as_number(tree: &RollTree<'_>) -> Operand {
    match tree {
        RollTree::Dice(d) => Operand::Dice(d.clone()),
        other => Operand::Int(other.total()),
    }
}

/// Dice-free targets become a plain number so the selection operator rejects
/// them by name.
fn as_pool(tree: &RollTree<'_>) -> RResult<Operand> {
    Ok(match tree {
        RollTree::Dice(d) => Operand::Dice(d.clone()),
        other => match other.pool() {
            Err(RollError::NotAPool(_)) => Operand::Int(other.total()),
            pool => Operand::Pool(pool?),
        },
    })
}

impl<'a, R: Roller, T: Tracer> visit::AstVisitor<'a> for RollContext<R, T> {
    type Output = RResult<RollTree<'a>>;

    fn visit_int(&mut self, x: &Int) -> Self::Output {
        Ok(Literal(*x).into())
    }

    fn visit_dice(&mut self, dice: &ast::Dice) -> Self::Output {
        Ok(self.roll_dice(dice)?.into())
    }

    fn visit_group(&mut self, inner: &ast::Expression<'a>) -> Self::Output {
        let value = inner.root().accept(self)?;
        Ok(Grouping::new(inner.text(), value).into())
    }

    fn visit_flagged(&mut self, target: &ast::Node<'a>, flag: &Flag) -> Self::Output {
        let target = target.accept(self)?;

        let operator = Operator::flag(flag, as_pool(&target)?);
        let result = operator.evaluate()?;
        let pool = target.pool()?;
        self.tracer.trace(&Step::Selected {
            operator: &operator,
            result: &result,
        });

        let (selected, total) = match result {
            Operand::Int(x) => (vec![x], x),
            other => {
                let selected = other.to_pool("total")?;
                let total = Total::new(selected.clone()).evaluate()?.to_int()?;
                (selected, total)
            }
        };
        Ok(Flagged::new(target, *flag, pool, selected, total).into())
    }

    fn visit_binary(
        &mut self,
        l: &ast::Node<'a>,
        op: &BinaryOperator,
        r: &ast::Node<'a>,
    ) -> Self::Output {
        let left = l.accept(self)?;
        let right = r.accept(self)?;

        let operator = Operator::binary(*op, as_number(&left), as_number(&right));
        let result = operator.evaluate()?;
        self.tracer.trace(&Step::Applied {
            operator: &operator,
            result: &result,
        });

        let total = result.to_int()?;
        Ok(Binary::new(left, *op, right, total).into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roll::roller::{FixedRoller, SequenceRoller};
    use crate::roll::trace::NoTrace;
    use proptest::prelude::*;

    fn eval_with<R: Roller>(s: &str, roller: R) -> RResult<Int> {
        let mut ctx = RollContext::new_bounded(DEFAULT_MAX_ROLLS, roller).with_tracer(NoTrace);
        let ast = crate::parse::parse(s).unwrap();
        ctx.eval(&ast).map(|roll| roll.total())
    }

    fn check(s: &str, fixed: Int, expected: Int) {
        assert_eq!(eval_with(s, FixedRoller(fixed)), Ok(expected), "{}", s);
    }

    fn check_seq(s: &str, draws: &[Int], expected: Int) {
        assert_eq!(eval_with(s, SequenceRoller::new(draws)), Ok(expected), "{}", s);
    }

    fn check_err(s: &str, expected: RollError) {
        assert_eq!(eval_with(s, FixedRoller(3)), Err(expected), "{}", s);
    }

    #[test]
    fn test_eval_number() {
        check("2", 1, 2);
        check("(7)", 1, 7);
    }

    #[test]
    fn test_eval_dice() {
        check("1d6", 3, 3);
        check("4d6", 3, 12);
        check("d20", 17, 17);
        check("3dF", -1, -3);
        check_seq("3d6", &[1, 4, 6], 11);
    }

    #[test]
    fn test_eval_arithmetic() {
        check("1d20+5", 17, 22);
        check("1d20-5", 12, 7);
        check("1d20-5", 2, 1);
        check("2 + 3 * 4", 1, 20);
        check("20 / 3 - 2", 1, 4);
        check("2 * (1 + 3)", 1, 8);
        check("10 - 2 - 3", 1, 5);
    }

    #[test]
    fn test_eval_flags() {
        check_seq("2d20!advantage", &[8, 15], 15);
        check_seq("2d20!disadvantage", &[8, 15], 8);
        check_seq("2d20!adv + 5", &[8, 15], 20);
        check_seq("4d6!keep(3)", &[3, 1, 5, 6], 14);
        check_seq("4d6!take(3)", &[3, 1, 5, 6], 14);
        check_seq("4d6!drop", &[3, 1, 5, 6], 14);
        check_seq("3d6!drop(2)", &[3, 1, 5], 5);
        check_seq("3d6!keep(0)", &[3, 1, 5], 0);
        check_seq("3d6!keep", &[3, 1, 5], 5);
    }

    #[test]
    fn test_eval_grouped_flags() {
        check_seq("(2d20+5)!advantage", &[8, 15], 20);
        check_seq("(2d20 + 5)!dis * 2", &[8, 15], 26);
        check_seq("(3d6!keep(2))!adv", &[3, 1, 5], 5);
    }

    #[test]
    fn test_rerolls_each_time() {
        let mut ctx = RollContext::new_unbounded(SequenceRoller::new([2, 5])).with_tracer(NoTrace);
        let ast = crate::parse::parse("1d6").unwrap();
        assert_eq!(ctx.eval(&ast).map(|r| r.total()), Ok(2));
        assert_eq!(ctx.eval(&ast).map(|r| r.total()), Ok(5));
    }

    #[test]
    fn test_trace_steps() {
        let mut steps = Vec::new();
        let mut ctx = RollContext::new_unbounded(SequenceRoller::new([8, 15]))
            .with_tracer(|step: &Step<'_>| steps.push(step.to_string()));
        let ast = crate::parse::parse("2d20!adv + 5").unwrap();
        ctx.eval(&ast).unwrap();
        drop(ctx);
        assert_eq!(
            steps,
            vec![
                "rolled 2d20 -> [8, 15]",
                "selected 2d20!advantage = 15",
                "applied 15+5 = 20",
            ]
        );
    }

    #[test]
    fn test_err_too_many_rolls() {
        check_err("1001d6", RollError::TooManyRolls);
        check_err("600d6 + 600d6", RollError::TooManyRolls);
        assert_eq!(eval_with("1000d6", FixedRoller(1)), Ok(1000));
    }

    #[test]
    fn test_roll_count_resets() {
        let mut ctx = RollContext::new_bounded(10, FixedRoller(1)).with_tracer(NoTrace);
        let ast = crate::parse::parse("6d6").unwrap();
        assert!(ctx.eval(&ast).is_ok());
        assert!(ctx.eval(&ast).is_ok());
        assert_eq!(ctx.rolls(), 6);
    }

    #[test]
    fn test_max_rolls() {
        assert_eq!(RollContext::default().max_rolls(), Some(DEFAULT_MAX_ROLLS));
        assert_eq!(RollContext::new_bounded(10, FixedRoller(1)).max_rolls(), Some(10));
        let ctx = RollContext::new_unbounded(FixedRoller(1)).with_tracer(NoTrace);
        assert_eq!(ctx.max_rolls(), None);
    }

    #[test]
    fn test_err_arithmetic() {
        check_err("1d6 / 0", RollError::ZeroDivision);
        check_err("9223372036854775807 + 1d6", RollError::Overflow);
    }

    #[test]
    fn test_err_flags() {
        check_err("2d6!grow", RollError::UnsupportedFlag(FlagKind::Grow));
        check_err("2d6!shrink", RollError::UnsupportedFlag(FlagKind::Shrink));
        check_err(
            "(2d6!keep(0))!adv",
            RollError::EmptySelection(FlagKind::Advantage),
        );
    }

    #[test]
    fn test_err_flag_on_number_group() {
        check_err("(5)!adv", RollError::NotAPool("advantage"));
        check_err("(2 + 3)!keep(1)", RollError::NotAPool("keep"));
        check_err("((7))!drop(2)", RollError::NotAPool("drop"));
        check_err("(5 + 1d6)!dis", RollError::NotAPool("disadvantage"));
    }

    proptest! {
        #[test]
        fn prop_fixed_roller_dice(rolls in 1..50u32, sides in 1..100u32, v in 1..100i64) {
            let dice: ast::Dice = format!("{}d{}", rolls, sides).parse().unwrap();
            let mut ctx = RollContext::new_unbounded(FixedRoller(v)).with_tracer(NoTrace);
            let rolled = ctx.roll_dice(&dice).unwrap();
            let expected = vec![v; rolls as usize];
            prop_assert_eq!(rolled.results(), expected.as_slice());
            prop_assert_eq!(rolled.total(), v * Int::from(rolls));
        }
    }
}
