use predql::ast::Predicate;

/// Extracts the conjuncts of a predicate tree.
///
/// Conjuncts are the predicates joined by AND at the top of the tree. Each one can be analyzed on its own and
/// the resulting ranges intersected. OR and NOT end a conjunct chain: their whole subtree is a single conjunct.
///
/// Example: `(foo = 1 AND (bar = 2 AND baz > 0)) AND (qux = 3 OR zed = 4)`
/// - `foo = 1`, `bar = 2` and `baz > 0` are conjuncts
/// - `qux = 3 OR zed = 4` is one conjunct
pub struct ConjunctFinder;

impl ConjunctFinder {
    /// Top-level conjuncts in order of appearance.
    pub fn find(predicate: &Predicate) -> Vec<Predicate> {
        let mut conjuncts = Vec::new();
        Self::extract_conjuncts(predicate, &mut conjuncts);
        conjuncts
    }

    fn extract_conjuncts(predicate: &Predicate, conjuncts: &mut Vec<Predicate>) {
        match predicate {
            Predicate::And(left, right) => {
                Self::extract_conjuncts(left, conjuncts);
                Self::extract_conjuncts(right, conjuncts);
            }
            _ => conjuncts.push(predicate.clone()),
        }
    }
}
