use crate::common::*;
use crate::parse::ast;

pub trait AstVisitor<'a> {
    type Output;

    fn visit<T: ?Sized>(&mut self, node: &T) -> Self::Output
    where
        T: Accept<'a, Self>,
    {
        node.accept(self)
    }

    fn visit_int(&mut self, x: &Int) -> Self::Output;

    fn visit_dice(&mut self, dice: &ast::Dice) -> Self::Output;

    fn visit_group(&mut self, group: &ast::Expression<'a>) -> Self::Output;

    fn visit_flagged(&mut self, target: &ast::Node<'a>, flag: &Flag) -> Self::Output;

    fn visit_binary(
        &mut self,
        l: &ast::Node<'a>,
        op: &BinaryOperator,
        r: &ast::Node<'a>,
    ) -> Self::Output;
}

pub trait Accept<'a, V: AstVisitor<'a> + ?Sized> {
    fn accept(&self, v: &mut V) -> V::Output;
}

impl<'a, V: AstVisitor<'a> + ?Sized> Accept<'a, V> for ast::Expression<'a> {
    fn accept(&self, v: &mut V) -> V::Output {
        v.visit(&self.roll)
    }
}

impl<'a, V: AstVisitor<'a> + ?Sized> Accept<'a, V> for ast::Node<'a> {
    fn accept(&self, v: &mut V) -> V::Output {
        match self {
            Self::Integer(x) => v.visit_int(x),
            Self::Dice(x) => v.visit_dice(x),
            Self::Group(x) => v.visit_group(x),
            Self::Flagged(x, flag) => v.visit_flagged(x, flag),
            Self::Binary(l, op, r) => v.visit_binary(l, op, r),
        }
    }
}
