/// Number of UN Sustainable Development Goals.
pub const GOAL_COUNT: u8 = 17;

const NAMES: [&str; GOAL_COUNT as usize] = [
    "No Poverty",
    "Zero Hunger",
    "Good Health and Well-being",
    "Quality Education",
    "Gender Equality",
    "Clean Water and Sanitation",
    "Affordable and Clean Energy",
    "Decent Work and Economic Growth",
    "Industry, Innovation and Infrastructure",
    "Reduced Inequalities",
    "Sustainable Cities and Communities",
    "Responsible Consumption and Production",
    "Climate Action",
    "Life Below Water",
    "Life on Land",
    "Peace, Justice and Strong Institutions",
    "Partnerships for the Goals",
];

/// A validated goal number in `1..=17`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Goal(u8);

impl Goal {
    pub fn new(number: u8) -> Option<Self> {
        (1..=GOAL_COUNT).contains(&number).then_some(Self(number))
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn name(&self) -> &'static str {
        NAMES[usize::from(self.0 - 1)]
    }
}

impl std::fmt::Display for Goal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SDG {}: {}", self.0, self.name())
    }
}

/// Official short name of a goal, if the number is in range.
pub fn goal_name(number: u8) -> Option<&'static str> {
    Goal::new(number).map(|g| g.name())
}
