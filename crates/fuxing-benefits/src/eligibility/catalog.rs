use super::applicant::{Applicant, Status};
use serde::{Deserialize, Serialize};

/// Display grouping for the result tabs. Every rule belongs to exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Cash,
    Medical,
    HousingTransport,
    Other,
}

impl Category {
    pub const fn ordered() -> [Self; 4] {
        [Self::Cash, Self::Medical, Self::HousingTransport, Self::Other]
    }

    pub const fn icon(self) -> &'static str {
        match self {
            Self::Cash => "💵",
            Self::Medical => "🩺",
            Self::HousingTransport => "🏠",
            Self::Other => "🛡️",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Cash => "現金津貼",
            Self::Medical => "醫療照護",
            Self::HousingTransport => "居住交通",
            Self::Other => "其他權益",
        }
    }

    pub const fn caption(self) -> &'static str {
        match self {
            Self::Cash => "每月或每年定期的現金補助",
            Self::Medical => "牙齒、健保與輔具補助",
            Self::HousingTransport => "房屋修繕與交通優惠",
            Self::Other => "喪葬與法律扶助",
        }
    }
}

/// Declarative eligibility predicate over an [`Applicant`]. Age bounds are inclusive
/// for `AgeAtLeast` and exclusive for `AgeBelow`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Always,
    AgeAtLeast(u8),
    AgeBelow(u8),
    Has(Status),
    Lacks(Status),
    All(&'static [Condition]),
}

impl Condition {
    pub fn holds(&self, applicant: &Applicant) -> bool {
        let age = applicant.age().get();
        match *self {
            Condition::Always => true,
            Condition::AgeAtLeast(min) => age >= min,
            Condition::AgeBelow(limit) => age < limit,
            Condition::Has(status) => applicant.has(status),
            Condition::Lacks(status) => !applicant.has(status),
            Condition::All(conditions) => conditions.iter().all(|inner| inner.holds(applicant)),
        }
    }

    /// Human-readable requirement, e.g. `年滿55歲 且 未滿65歲`.
    pub fn describe(&self) -> String {
        match *self {
            Condition::Always => "無條件 (符合服務對象即可)".to_string(),
            Condition::AgeAtLeast(min) => format!("年滿{min}歲"),
            Condition::AgeBelow(limit) => format!("未滿{limit}歲"),
            Condition::Has(status) => status.label().to_string(),
            Condition::Lacks(status) => status.negated_label().to_string(),
            Condition::All(conditions) => conditions
                .iter()
                .map(Condition::describe)
                .collect::<Vec<_>>()
                .join(" 且 "),
        }
    }
}

/// One fixed welfare program with its predicate and display text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BenefitRule {
    pub index: u8,
    pub name: &'static str,
    pub amount: &'static str,
    pub note: &'static str,
    pub office: &'static str,
    pub category: Category,
    pub highlight: bool,
    pub condition: Condition,
}

impl BenefitRule {
    pub fn applies_to(&self, applicant: &Applicant) -> bool {
        self.condition.holds(applicant)
    }
}

const SENIOR: Condition = Condition::AgeAtLeast(55);

pub static BENEFIT_RULES: [BenefitRule; 19] = [
    BenefitRule {
        index: 1,
        name: "桃園老人三節禮金",
        amount: "$2,500/每節 (年領$7,500)",
        note: "原住民55歲設籍滿6個月",
        office: "區公所社會課",
        category: Category::Cash,
        highlight: false,
        condition: SENIOR,
    },
    BenefitRule {
        index: 2,
        name: "桃園重陽敬老金",
        amount: "$2,500/年",
        note: "原住民55歲 (一般65歲)",
        office: "區公所社會課",
        category: Category::Cash,
        highlight: false,
        condition: SENIOR,
    },
    BenefitRule {
        index: 3,
        name: "原住民給付 (國保)",
        amount: "$4,049/月",
        note: "55-64歲專屬 (與老農互斥)",
        office: "區公所原民課",
        category: Category::Cash,
        highlight: false,
        condition: Condition::All(&[Condition::AgeAtLeast(55), Condition::AgeBelow(65)]),
    },
    BenefitRule {
        index: 4,
        name: "老農津貼",
        amount: "$8,110/月",
        note: "農保年資滿15年",
        office: "地區農會",
        category: Category::Cash,
        highlight: false,
        condition: Condition::All(&[
            Condition::Has(Status::FarmerInsured),
            Condition::AgeAtLeast(65),
        ]),
    },
    BenefitRule {
        index: 5,
        name: "桃園原民急難救助",
        amount: "最高3萬",
        note: "意外/重病/死亡 (3個月內申請)",
        office: "區公所原民課",
        category: Category::Cash,
        highlight: false,
        condition: Condition::Always,
    },
    BenefitRule {
        index: 6,
        name: "弱勢兒少托育(隔代)",
        amount: "$3,000起/月",
        note: "祖父母照顧孫子女補助",
        office: "區公所社會課",
        category: Category::Cash,
        highlight: false,
        condition: Condition::All(&[
            Condition::Has(Status::GrandparentCaregiver),
            Condition::Has(Status::LowIncome),
        ]),
    },
    BenefitRule {
        index: 7,
        name: "桃園原民假牙補助",
        amount: "最高4.4萬",
        note: "需先至診所估價",
        office: "區公所原民課",
        category: Category::Medical,
        highlight: false,
        condition: SENIOR,
    },
    BenefitRule {
        index: 8,
        name: "健保費全額補助",
        amount: "全額減免",
        note: "55-64歲原住民 (系統自動減免)",
        office: "健保局",
        category: Category::Medical,
        highlight: false,
        condition: SENIOR,
    },
    BenefitRule {
        index: 9,
        name: "成人健康檢查",
        amount: "免費",
        note: "每年一次 (原住民提早至55歲)",
        office: "衛生所/特約醫院",
        category: Category::Medical,
        highlight: false,
        condition: SENIOR,
    },
    BenefitRule {
        index: 10,
        name: "身障輔具補助",
        amount: "全額/部分",
        note: "助聽器/氣墊床等",
        office: "區公所社會課",
        category: Category::Medical,
        highlight: false,
        condition: Condition::Has(Status::Disability),
    },
    BenefitRule {
        index: 11,
        name: "復興區敬老愛心卡",
        amount: "每月1000點",
        note: "復興區民專屬福利 (一般區800點)",
        office: "區公所社會課",
        category: Category::HousingTransport,
        highlight: true,
        condition: SENIOR,
    },
    BenefitRule {
        index: 12,
        name: "愛心計程車",
        amount: "點數折抵",
        note: "單趟100元以下補36點",
        office: "各大車隊",
        category: Category::HousingTransport,
        highlight: false,
        condition: SENIOR,
    },
    BenefitRule {
        index: 13,
        name: "桃園修繕住宅補助",
        amount: "最高15萬",
        note: "屋頂/衛浴修繕 (需自有)",
        office: "區公所原民課",
        category: Category::HousingTransport,
        highlight: false,
        condition: Condition::Has(Status::Homeowner),
    },
    BenefitRule {
        index: 14,
        name: "桃園建購住宅補助",
        amount: "最高22萬",
        note: "購買或自建房屋",
        office: "區公所原民課",
        category: Category::HousingTransport,
        highlight: false,
        condition: Condition::Has(Status::Homeowner),
    },
    BenefitRule {
        index: 15,
        name: "租金補貼 (300億)",
        amount: "依等級 ($3000起)",
        note: "租屋者可申請",
        office: "線上申請/營建署",
        category: Category::HousingTransport,
        highlight: false,
        condition: Condition::Has(Status::Renter),
    },
    BenefitRule {
        index: 16,
        name: "農保喪葬津貼",
        amount: "$153,000",
        note: "農民身故 (由家屬請領)",
        office: "農會保險部",
        category: Category::Other,
        highlight: false,
        condition: Condition::Has(Status::FarmerInsured),
    },
    BenefitRule {
        index: 17,
        name: "國保喪葬給付",
        amount: "約9.8萬",
        note: "一般國保身故 (由家屬請領)",
        office: "勞保局",
        category: Category::Other,
        highlight: false,
        condition: Condition::Lacks(Status::FarmerInsured),
    },
    BenefitRule {
        index: 18,
        name: "原住民法律扶助",
        amount: "律師費全免",
        note: "訴訟/法律諮詢",
        office: "法扶基金會",
        category: Category::Other,
        highlight: false,
        condition: Condition::Always,
    },
    BenefitRule {
        index: 19,
        name: "意外保險 (微型)",
        amount: "最高30萬",
        note: "市府代為投保",
        office: "社會局",
        category: Category::Other,
        highlight: false,
        condition: Condition::Has(Status::LowIncome),
    },
];

/// Read-only view over a rule table kept in ascending `index` order.
#[derive(Debug, Clone, Copy)]
pub struct BenefitCatalog {
    rules: &'static [BenefitRule],
}

impl BenefitCatalog {
    pub fn standard() -> Self {
        Self {
            rules: &BENEFIT_RULES,
        }
    }

    pub fn rules(&self) -> &'static [BenefitRule] {
        self.rules
    }

    pub fn rule(&self, index: u8) -> Option<&'static BenefitRule> {
        self.rules.iter().find(|rule| rule.index == index)
    }

    pub fn rules_for_category(&self, category: Category) -> Vec<&'static BenefitRule> {
        self.rules
            .iter()
            .filter(|rule| rule.category == category)
            .collect()
    }
}

impl Default for BenefitCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
