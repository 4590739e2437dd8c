use super::tree::*;

pub trait VisitRoll {
    type Output;

    fn visit<A: AcceptRoll>(&mut self, a: &A) -> Self::Output {
        a.accept(self)
    }

    fn visit_roll(&mut self, x: &Roll<'_>) -> Self::Output;

    fn visit_literal(&mut self, x: &Literal) -> Self::Output;

    fn visit_dice(&mut self, x: &Dice) -> Self::Output;

    fn visit_grouping(&mut self, x: &Grouping<'_>) -> Self::Output;

    fn visit_flagged(&mut self, x: &Flagged<'_>) -> Self::Output;

    fn visit_binary(&mut self, x: &Binary<'_>) -> Self::Output;
}

#[enum_dispatch::enum_dispatch]
pub trait AcceptRoll: Sized + Eval {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output;
}

impl AcceptRoll for Roll<'_> {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_roll(self)
    }
}

impl AcceptRoll for Literal {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_literal(self)
    }
}

impl AcceptRoll for Dice {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_dice(self)
    }
}

impl AcceptRoll for Grouping<'_> {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_grouping(self)
    }
}

impl AcceptRoll for Flagged<'_> {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_flagged(self)
    }
}

impl AcceptRoll for Binary<'_> {
    fn accept<V: VisitRoll + ?Sized>(&self, v: &mut V) -> V::Output {
        v.visit_binary(self)
    }
}
