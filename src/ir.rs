use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::layout::LayoutError;

pub type CourseId = u32;
pub type DepartmentId = u32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Period {
    #[serde(rename = "bisemestral", alias = "bimonthly")]
    Bimonthly,
    #[serde(rename = "semestre_par", alias = "even_semester", alias = "par")]
    EvenSemester,
    #[serde(rename = "semestre_impar", alias = "odd_semester", alias = "impar")]
    OddSemester,
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl Period {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bimonthly => "bisemestral",
            Self::EvenSemester => "semestre_par",
            Self::OddSemester => "semestre_impar",
            Self::Unknown => "unknown",
        }
    }
}

/// Reference to another course, as delivered by the data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseRef {
    pub id: CourseId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl CourseRef {
    pub fn new(id: CourseId) -> Self {
        Self { id, name: None }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub name: String,
    #[serde(rename = "codigo", alias = "code", default)]
    pub code: Option<String>,
    #[serde(rename = "periodo", alias = "period", default)]
    pub period: Period,
    #[serde(rename = "creditos", alias = "credits", default)]
    pub credits: u32,
    #[serde(rename = "min_creditos", alias = "min_credits", default)]
    pub min_credits: Option<u32>,
    #[serde(rename = "instituto_id", alias = "department_id", default)]
    pub department_id: DepartmentId,
    #[serde(default = "default_active")]
    pub active: bool,
    #[serde(rename = "previas_aprobado", alias = "approved", default)]
    pub approved: Vec<CourseRef>,
    #[serde(rename = "previas_exonerado", alias = "exempted", default)]
    pub exempted: Vec<CourseRef>,
}

fn default_active() -> bool {
    true
}

impl Course {
    pub fn new(id: CourseId, name: &str, department_id: DepartmentId) -> Self {
        Self {
            id,
            name: name.to_string(),
            code: None,
            period: Period::Unknown,
            credits: 0,
            min_credits: None,
            department_id,
            active: true,
            approved: Vec::new(),
            exempted: Vec::new(),
        }
    }

    pub fn with_prerequisites(mut self, ids: &[CourseId]) -> Self {
        self.approved.extend(ids.iter().copied().map(CourseRef::new));
        self
    }

    /// Both approval modes, approved first, in declaration order.
    pub fn prerequisites(&self) -> impl Iterator<Item = CourseId> + '_ {
        self.approved
            .iter()
            .chain(self.exempted.iter())
            .map(|prev| prev.id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
    pub id: DepartmentId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRef {
    pub id: u32,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Career {
    pub id: u32,
    pub name: String,
    #[serde(rename = "materias_obligatorias", alias = "mandatory", default)]
    pub mandatory: Vec<CourseRef>,
    #[serde(rename = "materias_opcionales", alias = "optional", default)]
    pub optional: Vec<CourseRef>,
    #[serde(rename = "perfiles", alias = "profiles", default)]
    pub profiles: Vec<ProfileRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: u32,
    pub name: String,
    #[serde(rename = "carrera_id", alias = "career_id")]
    pub career_id: u32,
    #[serde(rename = "materias_obligatorias", alias = "mandatory", default)]
    pub mandatory: Vec<CourseRef>,
}

/// Snapshot of everything the data source hands to the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    #[serde(rename = "materias", alias = "courses", default)]
    pub courses: Vec<Course>,
    #[serde(rename = "institutos", alias = "departments", default)]
    pub departments: Vec<Department>,
    #[serde(rename = "carreras", alias = "careers", default)]
    pub careers: Vec<Career>,
    #[serde(rename = "perfiles", alias = "profiles", default)]
    pub profiles: Vec<Profile>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogFile {
    Full(Catalog),
    Courses(Vec<Course>),
}

impl Catalog {
    pub fn from_courses(courses: Vec<Course>) -> Self {
        Self {
            courses,
            ..Default::default()
        }
    }

    /// Accepts either a full catalog object or a bare course array.
    pub fn from_json(input: &str) -> anyhow::Result<Self> {
        let parsed: CatalogFile = serde_json::from_str(input)?;
        let catalog = match parsed {
            CatalogFile::Full(catalog) => catalog,
            CatalogFile::Courses(courses) => Self::from_courses(courses),
        };
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), LayoutError> {
        let mut seen: HashSet<CourseId> = HashSet::new();
        for course in &self.courses {
            if !seen.insert(course.id) {
                return Err(LayoutError::DuplicateCourse(course.id));
            }
        }
        Ok(())
    }

    pub fn career(&self, id: u32) -> Result<&Career, LayoutError> {
        self.careers
            .iter()
            .find(|career| career.id == id)
            .ok_or(LayoutError::UnknownCareer(id))
    }

    pub fn profile(&self, id: u32) -> Result<&Profile, LayoutError> {
        self.profiles
            .iter()
            .find(|profile| profile.id == id)
            .ok_or(LayoutError::UnknownProfile(id))
    }

    pub fn department_name(&self, id: DepartmentId) -> String {
        department_name(&self.departments, id)
    }
}

pub fn department_name(departments: &[Department], id: DepartmentId) -> String {
    departments
        .iter()
        .find(|dept| dept.id == id)
        .map(|dept| dept.name.clone())
        .unwrap_or_else(|| format!("Department {id}"))
}

/// Active selection driving a build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Filters {
    pub career: Option<u32>,
    pub profile: Option<u32>,
    pub show_baseline: bool,
}
