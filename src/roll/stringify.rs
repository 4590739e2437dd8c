use super::tree::*;
use super::visit::{AcceptRoll, VisitRoll};
use crate::common::{Int, Sides};
use std::fmt;

pub trait Stringify {
    fn stringify<A: AcceptRoll>(&mut self, a: &A) -> String {
        a.accept(self)
    }

    fn str_roll(&mut self, roll: &Roll<'_>) -> String {
        let tree = self.stringify(&roll.tree);
        let total = self.str_total(roll.total());
        format!("{} = {}", tree, total)
    }

    fn str_total(&mut self, total: Int) -> String {
        total.to_string()
    }

    fn str_literal(&mut self, lit: &Literal) -> String {
        lit.0.to_string()
    }

    fn str_dice(&mut self, dice: &Dice) -> String {
        let results = self.str_results(dice.results(), Some(dice.sides()), None);
        format!("{} ({})", dice.dice, results)
    }

    fn str_grouping(&mut self, g: &Grouping<'_>) -> String {
        let inner = self.stringify(&*g.inner);
        format!("({})", inner)
    }

    fn str_flagged(&mut self, flagged: &Flagged<'_>) -> String {
        let kept = flagged.kept();
        // A flagged dice term shows its results once, after the flag.
        let (target, sides) = match &*flagged.target {
            RollTree::Dice(d) => (d.dice.to_string(), Some(d.sides())),
            other => (self.stringify(other), None),
        };
        let results = self.str_results(&flagged.pool, sides, Some(&kept));
        format!("{}{} ({})", target, flagged.flag, results)
    }

    fn str_binary(&mut self, bin: &Binary<'_>) -> String {
        let l = self.stringify(&*bin.left);
        let r = self.stringify(&*bin.right);
        format!("{} {} {}", l, bin.op, r)
    }

    fn str_results(&mut self, results: &[Int], sides: Option<Sides>, kept: Option<&[bool]>) -> String {
        results
            .iter()
            .enumerate()
            .map(|(i, &x)| self.str_result(x, sides, kept.map_or(true, |k| k[i])))
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// One die result. `sides` is `None` for results that are not faces of
    /// a single die, such as the members of a group.
    fn str_result(&mut self, value: Int, _sides: Option<Sides>, _kept: bool) -> String {
        value.to_string()
    }
}

#[derive(Default)]
pub struct SimpleStringifier;

impl SimpleStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify<A: AcceptRoll>(&mut self, roll: &A) -> String {
        Stringify::stringify(self, roll)
    }
}

impl Stringify for SimpleStringifier {}

/// Renders rolls for chat: the total in code, critical faces in bold and
/// results a flag threw away struck through.
#[derive(Default)]
pub struct MarkdownStringifier;

impl MarkdownStringifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stringify<A: AcceptRoll>(&mut self, roll: &A) -> String {
        Stringify::stringify(self, roll)
    }
}

impl Stringify for MarkdownStringifier {
    fn str_total(&mut self, total: Int) -> String {
        format!("`{}`", total)
    }

    fn str_result(&mut self, value: Int, sides: Option<Sides>, kept: bool) -> String {
        let crit = match sides {
            Some(Sides::Poly(n)) => value == 1 || value == Int::from(n.get()),
            _ => false,
        };
        let ret = if crit {
            format!("**{}**", value)
        } else {
            value.to_string()
        };
        if kept {
            ret
        } else {
            format!("~~{}~~", ret)
        }
    }
}

impl<S: ?Sized> VisitRoll for S
where
    S: Stringify,
{
    type Output = String;

    fn visit_roll(&mut self, x: &Roll<'_>) -> Self::Output {
        self.str_roll(x)
    }

    fn visit_literal(&mut self, x: &Literal) -> Self::Output {
        self.str_literal(x)
    }

    fn visit_dice(&mut self, x: &Dice) -> Self::Output {
        self.str_dice(x)
    }

    fn visit_grouping(&mut self, x: &Grouping<'_>) -> Self::Output {
        self.str_grouping(x)
    }

    fn visit_flagged(&mut self, x: &Flagged<'_>) -> Self::Output {
        self.str_flagged(x)
    }

    fn visit_binary(&mut self, x: &Binary<'_>) -> Self::Output {
        self.str_binary(x)
    }
}

impl fmt::Display for Roll<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&SimpleStringifier::new().stringify(self))
    }
}
