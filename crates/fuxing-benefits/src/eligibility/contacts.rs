use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContactGroup {
    ServiceLine,
    CareResource,
}

impl ContactGroup {
    pub const fn ordered() -> [Self; 2] {
        [Self::ServiceLine, Self::CareResource]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::ServiceLine => "📞 服務專線",
            Self::CareResource => "🏥 照護資源",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Contact {
    pub group: ContactGroup,
    pub name: &'static str,
    pub phone: &'static str,
}

pub static CONTACTS: [Contact; 4] = [
    Contact {
        group: ContactGroup::ServiceLine,
        name: "復興區公所",
        phone: "(03) 382-1500",
    },
    Contact {
        group: ContactGroup::ServiceLine,
        name: "市民專線",
        phone: "1999",
    },
    Contact {
        group: ContactGroup::CareResource,
        name: "長照專線",
        phone: "1966",
    },
    Contact {
        group: ContactGroup::CareResource,
        name: "復興區衛生所",
        phone: "(03) 382-2325",
    },
];

pub const DISCLAIMER: &str = "本試算系統僅供參考，實際資格以政府機關最新核定為準。";

pub fn contacts_in(group: ContactGroup) -> impl Iterator<Item = &'static Contact> {
    CONTACTS.iter().filter(move |contact| contact.group == group)
}
