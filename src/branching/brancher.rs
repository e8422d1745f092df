use super::value_selection::InDomainMin;
use super::value_selection::ValueSelector;
use super::variable_selection::InputOrder;
use super::variable_selection::VariableSelector;
use super::Decision;
use super::SelectionContext;
use crate::basic_types::Solution;

/// The interface of a search heuristic: produce the next [`Decision`], and
/// observe the search events needed to adapt.
pub trait Brancher {
    /// The next decision, or `None` when every variable this brancher ranges
    /// over is fixed.
    fn next_decision(&mut self, context: &mut SelectionContext<'_>) -> Option<Decision>;

    /// Called whenever the search encounters a contradiction.
    fn on_conflict(&mut self) {}

    /// Called whenever the search finds a solution.
    fn on_solution(&mut self, _solution: &Solution) {}

    /// Called when the search restarts from the root.
    fn on_restart(&mut self) {}
}

/// A [`Brancher`] that composes an arbitrary [`VariableSelector`] with an
/// arbitrary [`ValueSelector`], with no coupling between the two.
#[derive(Debug, Clone)]
pub struct IndependentVariableValueBrancher<VarSel, ValSel> {
    variable_selector: VarSel,
    value_selector: ValSel,
}

impl<VarSel, ValSel> IndependentVariableValueBrancher<VarSel, ValSel> {
    pub fn new(variable_selector: VarSel, value_selector: ValSel) -> Self {
        IndependentVariableValueBrancher {
            variable_selector,
            value_selector,
        }
    }
}

impl<VarSel, ValSel> Brancher for IndependentVariableValueBrancher<VarSel, ValSel>
where
    VarSel: VariableSelector,
    ValSel: ValueSelector,
{
    fn next_decision(&mut self, context: &mut SelectionContext<'_>) -> Option<Decision> {
        self.variable_selector
            .select_variable(context)
            .map(|variable| self.value_selector.select_value(context, variable))
    }
}

/// The fallback heuristic: first unfixed variable in creation order, smallest
/// value first.
pub type DefaultBrancher = IndependentVariableValueBrancher<InputOrder, InDomainMin>;

impl DefaultBrancher {
    pub(crate) fn over(variables: Vec<crate::variables::DomainId>) -> Self {
        IndependentVariableValueBrancher::new(InputOrder::new(variables), InDomainMin)
    }
}
