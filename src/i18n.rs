//! Localization table for task text and fixed UI labels.
//!
//! Task text is keyed by [`TaskKey`] and labels by [`Label`]; neither lookup
//! ever goes through a displayed string. [`resolve`] and
//! [`TaskKey::from_title`] exist for data saved before tasks carried a key,
//! where the only handle on a task was whatever title happened to be shown.

use crate::catalog::{TaskKey, CATALOG};
use crate::fields::Language;

/// Localized title and description of one milestone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskText {
    pub title: &'static str,
    pub description: &'static str,
}

const fn text(title: &'static str, description: &'static str) -> TaskText {
    TaskText { title, description }
}

/// Per-key text in `[English, Spanish, Vietnamese]` order, catalog order.
const TASK_TEXT: [[TaskText; 3]; 24] = [
    [
        text("IEP Participation", "Have your child participate at their IEP meetings; learn about student-led IEPs"),
        text("Participación en el IEP", "Haga que su hijo participe en sus reuniones del IEP; infórmese sobre los IEP dirigidos por el estudiante"),
        text("Tham Gia IEP", "Cho con tham gia các buổi họp IEP của mình; tìm hiểu về IEP do học sinh tự điều hành"),
    ],
    [
        text("Disability Understanding", "Teach child about their disability; identify strengths and needs"),
        text("Comprensión de la Discapacidad", "Enseñe a su hijo sobre su discapacidad; identifique fortalezas y necesidades"),
        text("Hiểu Biết Về Khuyết Tật", "Dạy con về khuyết tật của mình; xác định điểm mạnh và nhu cầu"),
    ],
    [
        text("Individual Transition Plan", "Learn about an Individual Transition Plan (ITP); ask 504 team about transition planning"),
        text("Plan Individual de Transición", "Infórmese sobre el Plan Individual de Transición (ITP); pregunte al equipo 504 sobre la planificación de la transición"),
        text("Kế Hoạch Chuyển Tiếp Cá Nhân", "Tìm hiểu về Kế Hoạch Chuyển Tiếp Cá Nhân (ITP); hỏi nhóm 504 về việc lập kế hoạch chuyển tiếp"),
    ],
    [
        text("Self-care Routines", "Develop self-care routines; assign chores"),
        text("Rutinas de Autocuidado", "Desarrolle rutinas de autocuidado; asigne tareas domésticas"),
        text("Thói Quen Tự Chăm Sóc", "Xây dựng thói quen tự chăm sóc bản thân; giao việc nhà"),
    ],
    [
        text("High School Planning", "High school diploma? New pathway to diploma? Certificate of completion?"),
        text("Planificación de la Preparatoria", "¿Diploma de preparatoria? ¿Nueva vía hacia el diploma? ¿Certificado de finalización?"),
        text("Lập Kế Hoạch Trung Học", "Bằng tốt nghiệp trung học? Lộ trình mới để lấy bằng? Chứng chỉ hoàn thành?"),
    ],
    [
        text("Post-High School Planning", "Apply for college and/or other post-high school programs and opportunities"),
        text("Planificación Después de la Preparatoria", "Solicite ingreso a la universidad y/u otros programas y oportunidades después de la preparatoria"),
        text("Lập Kế Hoạch Sau Trung Học", "Nộp đơn vào đại học và/hoặc các chương trình, cơ hội khác sau trung học"),
    ],
    [
        text("Legal Documents", "Obtain Driver's License/ID, Passport, Register to Vote, Selective Service"),
        text("Documentos Legales", "Obtenga licencia de conducir/identificación y pasaporte; regístrese para votar y en el Servicio Selectivo"),
        text("Giấy Tờ Pháp Lý", "Làm bằng lái xe/thẻ căn cước, hộ chiếu; đăng ký cử tri và đăng ký Nghĩa Vụ Quân Sự (Selective Service)"),
    ],
    [
        text("Decision Making Assessment", "Determine youth's ability to make decisions at 18"),
        text("Evaluación de la Toma de Decisiones", "Determine la capacidad del joven para tomar decisiones a los 18 años"),
        text("Đánh Giá Khả Năng Ra Quyết Định", "Xác định khả năng tự ra quyết định của thanh thiếu niên khi 18 tuổi"),
    ],
    [
        text("Healthcare Transition", "Navigate transition from pediatric to adult healthcare; review insurance coverage; investigate rider of continued eligibility"),
        text("Transición de la Atención Médica", "Gestione la transición de la atención pediátrica a la de adultos; revise la cobertura del seguro; investigue la cláusula de elegibilidad continua"),
        text("Chuyển Tiếp Chăm Sóc Sức Khỏe", "Chuyển từ chăm sóc sức khỏe nhi khoa sang người lớn; xem lại phạm vi bảo hiểm; tìm hiểu điều khoản tiếp tục đủ điều kiện"),
    ],
    [
        text("Letter of Intent", "Start a Letter of Intent; review on an annual basis"),
        text("Carta de Intención", "Comience una Carta de Intención; revísela anualmente"),
        text("Thư Bày Tỏ Nguyện Vọng", "Bắt đầu viết Thư Bày Tỏ Nguyện Vọng; xem lại hằng năm"),
    ],
    [
        text("Adult Options", "Explore adulting options: Department of Rehabilitation, Regional Center, education/training, housing, assistive technology"),
        text("Opciones para Adultos", "Explore opciones para la vida adulta: Departamento de Rehabilitación, Centro Regional, educación/capacitación, vivienda, tecnología de asistencia"),
        text("Lựa Chọn Khi Trưởng Thành", "Tìm hiểu các lựa chọn khi trưởng thành: Sở Phục Hồi Chức Năng, Trung Tâm Khu Vực, giáo dục/đào tạo, nhà ở, công nghệ hỗ trợ"),
    ],
    [
        text("Public Benefits", "Investigate public benefits: CalFresh, In-Home Supportive Services (IHSS), Supplemental Security Income (SSI), MediCal, Medicare"),
        text("Beneficios Públicos", "Investigue los beneficios públicos: CalFresh, Servicios de Apoyo en el Hogar (IHSS), Ingreso Suplementario de Seguridad (SSI), MediCal, Medicare"),
        text("Phúc Lợi Công Cộng", "Tìm hiểu các phúc lợi công cộng: CalFresh, Dịch Vụ Hỗ Trợ Tại Nhà (IHSS), Tiền Trợ Cấp An Sinh Bổ Sung (SSI), MediCal, Medicare"),
    ],
    [
        text("Financial Planning", "Explore financial/estate planning: ABLE accounts, special needs trusts, conservatorship, durable power of attorney, supported decision making"),
        text("Planificación Financiera", "Explore la planificación financiera y patrimonial: cuentas ABLE, fideicomisos para necesidades especiales, tutela, poder notarial duradero, toma de decisiones con apoyo"),
        text("Lập Kế Hoạch Tài Chính", "Tìm hiểu về lập kế hoạch tài chính/tài sản: tài khoản ABLE, quỹ ủy thác cho nhu cầu đặc biệt, quyền giám hộ, giấy ủy quyền lâu dài, hỗ trợ ra quyết định"),
    ],
    [
        text("Regional Center Services", "Regional Center clients: understand post secondary services; explore Self-Determination"),
        text("Servicios del Centro Regional", "Clientes del Centro Regional: comprenda los servicios postsecundarios; explore la Autodeterminación"),
        text("Dịch Vụ Trung Tâm Khu Vực", "Thân chủ của Trung Tâm Khu Vực: tìm hiểu các dịch vụ sau trung học; tìm hiểu chương trình Tự Quyết"),
    ],
    [
        text("Independence Skills", "Increase independence at home; promote independence in choice-making, communication, life skills, and more"),
        text("Habilidades de Independencia", "Aumente la independencia en el hogar; fomente la independencia en la toma de decisiones, la comunicación, las habilidades para la vida y más"),
        text("Kỹ Năng Tự Lập", "Tăng tính tự lập ở nhà; khuyến khích tự lập trong việc lựa chọn, giao tiếp, kỹ năng sống và nhiều hơn nữa"),
    ],
    [
        text("Transportation Strategies", "Develop transportation/mobility strategies"),
        text("Estrategias de Transporte", "Desarrolle estrategias de transporte y movilidad"),
        text("Chiến Lược Đi Lại", "Xây dựng các chiến lược đi lại/di chuyển"),
    ],
    [
        text("Self-Advocacy Skills", "Develop self-advocacy/determination skills early. Research strength-based person centered planning; develop a person centered plan"),
        text("Habilidades de Autodefensa", "Desarrolle desde temprano habilidades de autodefensa y autodeterminación. Investigue la planificación centrada en la persona basada en fortalezas; desarrolle un plan centrado en la persona"),
        text("Kỹ Năng Tự Vận Động", "Phát triển sớm các kỹ năng tự vận động/tự quyết. Tìm hiểu việc lập kế hoạch lấy con người làm trung tâm dựa trên điểm mạnh; xây dựng một kế hoạch lấy con người làm trung tâm"),
    ],
    [
        text("Assistive Technology", "Investigate assistive technology tools that increase involvement and opportunities"),
        text("Tecnología de Asistencia", "Investigue herramientas de tecnología de asistencia que aumenten la participación y las oportunidades"),
        text("Công Nghệ Hỗ Trợ", "Tìm hiểu các công cụ công nghệ hỗ trợ giúp tăng sự tham gia và cơ hội"),
    ],
    [
        text("Health Education", "Talk about puberty, sexuality, and safety"),
        text("Educación para la Salud", "Hable sobre la pubertad, la sexualidad y la seguridad"),
        text("Giáo Dục Sức Khỏe", "Nói chuyện về tuổi dậy thì, giới tính và an toàn"),
    ],
    [
        text("Disability Rights", "Explore history of disability rights"),
        text("Derechos de las Personas con Discapacidad", "Explore la historia de los derechos de las personas con discapacidad"),
        text("Quyền Của Người Khuyết Tật", "Tìm hiểu lịch sử quyền của người khuyết tật"),
    ],
    [
        text("Work Programs", "Explore WorkAbility and/or transition partnership programs; understand Department of Rehabilitation services, including student services and supportive employment services"),
        text("Programas de Trabajo", "Explore WorkAbility y/o programas de asociación para la transición; comprenda los servicios del Departamento de Rehabilitación, incluidos los servicios estudiantiles y de empleo con apoyo"),
        text("Chương Trình Việc Làm", "Tìm hiểu WorkAbility và/hoặc các chương trình hợp tác chuyển tiếp; tìm hiểu các dịch vụ của Sở Phục Hồi Chức Năng, bao gồm dịch vụ cho học sinh và dịch vụ việc làm có hỗ trợ"),
    ],
    [
        text("Career Planning", "Develop a postsecondary employment goal as part of your ITP; develop and review a career plan"),
        text("Planificación Profesional", "Establezca una meta de empleo postsecundario como parte de su ITP; desarrolle y revise un plan profesional"),
        text("Lập Kế Hoạch Nghề Nghiệp", "Đặt mục tiêu việc làm sau trung học trong ITP; xây dựng và xem lại kế hoạch nghề nghiệp"),
    ],
    [
        text("Work Experience", "Build work experience: intern/volunteer/job; practicing filling out job applications, writing resumes"),
        text("Experiencia Laboral", "Adquiera experiencia laboral: prácticas/voluntariado/empleo; practique cómo llenar solicitudes de empleo y escribir currículums"),
        text("Kinh Nghiệm Làm Việc", "Tích lũy kinh nghiệm làm việc: thực tập/tình nguyện/việc làm; tập điền đơn xin việc, viết sơ yếu lý lịch"),
    ],
    [
        text("Employment Services", "Regional Center clients: explore supportive employment/work services and Paid Internship program"),
        text("Servicios de Empleo", "Clientes del Centro Regional: explore los servicios de empleo con apoyo y el programa de Prácticas Remuneradas"),
        text("Dịch Vụ Việc Làm", "Thân chủ của Trung Tâm Khu Vực: tìm hiểu các dịch vụ việc làm có hỗ trợ và chương trình Thực Tập Có Lương"),
    ],
];

/// Title and description of `key` in `lang`.
pub fn task_text(key: TaskKey, lang: Language) -> TaskText {
    TASK_TEXT[key.position()][lang.index()]
}

impl TaskKey {
    /// Match a title in any supported language back to its key.
    ///
    /// Comparison ignores case and surrounding whitespace.
    pub fn from_title(title: &str) -> Option<TaskKey> {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            return None;
        }
        CATALOG
            .iter()
            .map(|e| e.key)
            .find(|&key| {
                TASK_TEXT[key.position()]
                    .iter()
                    .any(|t| t.title.to_lowercase() == needle)
            })
    }
}

/// Re-express a displayed title/description pair in `target`.
///
/// Any language variant of a known title resolves to the target text.
/// Unrecognised input comes back untouched.
pub fn resolve<'a>(title: &'a str, description: &'a str, target: Language) -> (&'a str, &'a str) {
    match TaskKey::from_title(title) {
        Some(key) => {
            let t = task_text(key, target);
            (t.title, t.description)
        }
        None => (title, description),
    }
}

/// Stable identifiers for fixed UI text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Label {
    AppTitle,
    Settings,
    Done,
    ResetTasks,
    ResetConfirmation,
    Cancel,
    Reset,
    ChildBirthDate,
    Birthday,
    ResetToDefault,
    Language,
    TaskDetails,
    AgeRange,
    Status,
    Notes,
    CurrentAge,
    YearsOld,
    WorkInProgress,
    Yes,
    No,
    Help,
    Under12,
    Ages12To16,
    Ages16To18,
    Ages18To22,
    Ages22Plus,
    TransitionPlanning,
    EducationTraining,
    AdultLife,
    SelfAdvocacy,
    WorkPreparation,
    NotStarted,
    InProgress,
    Completed,
    TimelineHint,
    DetailHint,
    NotesHint,
    SettingsHint,
    ConfirmHint,
    BirthdayFormatHint,
    InvalidBirthday,
    TasksReset,
    Id,
    Title,
    Category,
    NoMatchingTasks,
    OpenForAge,
    NotesUpdated,
    NotesCleared,
    ClearNotes,
    Quit,
}

/// Localized text for a UI label.
pub fn label(label: Label, lang: Language) -> &'static str {
    label_strings(label)[lang.index()]
}

fn label_strings(label: Label) -> [&'static str; 3] {
    match label {
        Label::AppTitle => ["PHP Planner", "PHP Planificador", "Kế Hoạch PHP"],
        Label::Settings => ["Settings", "Ajustes", "Cài Đặt"],
        Label::Done => ["Done", "Hecho", "Xong"],
        Label::ResetTasks => ["Reset Tasks", "Restablecer Tareas", "Đặt Lại Công Việc"],
        Label::ResetConfirmation => [
            "Are you sure you want to reset all tasks to their default state? This action cannot be undone.",
            "¿Está seguro de que desea restablecer todas las tareas a su estado predeterminado? Esta acción no se puede deshacer.",
            "Bạn có chắc muốn đặt lại tất cả công việc về trạng thái mặc định không? Không thể hoàn tác thao tác này.",
        ],
        Label::Cancel => ["Cancel", "Cancelar", "Hủy"],
        Label::Reset => ["Reset", "Restablecer", "Đặt Lại"],
        Label::ChildBirthDate => ["Child's Birth Date", "Fecha de Nacimiento del Niño", "Ngày Sinh Của Trẻ"],
        Label::Birthday => ["Birthday", "Fecha de Nacimiento", "Ngày Sinh"],
        Label::ResetToDefault => [
            "Reset to Default Tasks",
            "Restablecer a Tareas Predeterminadas",
            "Đặt Lại Công Việc Mặc Định",
        ],
        Label::Language => ["Language", "Idioma", "Ngôn Ngữ"],
        Label::TaskDetails => ["Task Details", "Detalles de la Tarea", "Chi Tiết Công Việc"],
        Label::AgeRange => ["Age Range", "Rango de Edad", "Độ Tuổi"],
        Label::Status => ["Status", "Estado", "Trạng Thái"],
        Label::Notes => ["Notes", "Notas", "Ghi Chú"],
        Label::CurrentAge => ["Current Age", "Edad Actual", "Tuổi Hiện Tại"],
        Label::YearsOld => ["years old", "años", "tuổi"],
        Label::WorkInProgress => ["Working On It", "Trabajando en Ello", "Đang Làm"],
        Label::Yes => ["Yes", "Sí", "Có"],
        Label::No => ["No", "No", "Không"],
        Label::Help => ["Help", "Ayuda", "Trợ Giúp"],
        Label::Under12 => ["Under 12", "< 12", "Dưới 12"],
        Label::Ages12To16 => ["12 - 16", "12 - 16", "12 - 16"],
        Label::Ages16To18 => ["16 - 18", "16 - 18", "16 - 18"],
        Label::Ages18To22 => ["18 - 22", "18 - 22", "18 - 22"],
        Label::Ages22Plus => ["22+", "22+", "22+"],
        Label::TransitionPlanning => [
            "Transition Planning",
            "Planificación de Transición",
            "Lập Kế Hoạch Chuyển Tiếp",
        ],
        Label::EducationTraining => [
            "Education and Training",
            "Educación y Capacitación",
            "Giáo Dục và Đào Tạo",
        ],
        Label::AdultLife => ["Adult Life", "Vida Adulta", "Cuộc Sống Trưởng Thành"],
        Label::SelfAdvocacy => ["Self-Advocacy", "Auto-Defensa", "Tự Vận Động"],
        Label::WorkPreparation => [
            "Work Preparation",
            "Preparación para el Trabajo",
            "Chuẩn Bị Việc Làm",
        ],
        Label::NotStarted => ["Not Started", "No Iniciado", "Chưa Bắt Đầu"],
        Label::InProgress => ["In Progress", "En Progreso", "Đang Thực Hiện"],
        Label::Completed => ["Completed", "Completado", "Hoàn Thành"],
        Label::TimelineHint => [
            "Up/Down select  Enter details  s settings  h help  q quit",
            "Arriba/Abajo seleccionar  Enter detalles  s ajustes  h ayuda  q salir",
            "Lên/Xuống chọn  Enter chi tiết  s cài đặt  h trợ giúp  q thoát",
        ],
        Label::DetailHint => [
            "Left/Right status  w working on it  n notes  Esc back",
            "Izq/Der estado  w trabajando  n notas  Esc volver",
            "Trái/Phải trạng thái  w đang làm  n ghi chú  Esc quay lại",
        ],
        Label::NotesHint => [
            "Type to edit  Enter new line  Esc save and return",
            "Escriba para editar  Enter nueva línea  Esc guardar y volver",
            "Gõ để sửa  Enter xuống dòng  Esc lưu và quay lại",
        ],
        Label::SettingsHint => [
            "b edit birthday  l change language  r reset tasks  Esc done",
            "b editar fecha  l cambiar idioma  r restablecer tareas  Esc hecho",
            "b sửa ngày sinh  l đổi ngôn ngữ  r đặt lại công việc  Esc xong",
        ],
        Label::ConfirmHint => [
            "Press 'y' to confirm, 'n' to cancel",
            "Pulse 'y' para confirmar, 'n' para cancelar",
            "Nhấn 'y' để xác nhận, 'n' để hủy",
        ],
        Label::BirthdayFormatHint => [
            "YYYY-MM-DD, Enter to save, Esc to cancel",
            "AAAA-MM-DD, Enter para guardar, Esc para cancelar",
            "NNNN-TT-NN, Enter để lưu, Esc để hủy",
        ],
        Label::InvalidBirthday => [
            "Invalid birthday",
            "Fecha de nacimiento no válida",
            "Ngày sinh không hợp lệ",
        ],
        Label::TasksReset => [
            "Tasks reset to defaults",
            "Tareas restablecidas",
            "Đã đặt lại công việc",
        ],
        Label::Id => ["ID", "ID", "Mã"],
        Label::Title => ["Title", "Título", "Tiêu Đề"],
        Label::Category => ["Category", "Categoría", "Danh Mục"],
        Label::NoMatchingTasks => [
            "No matching tasks.",
            "No hay tareas que coincidan.",
            "Không có công việc phù hợp.",
        ],
        Label::OpenForAge => [
            "Open tasks for this age",
            "Tareas pendientes para esta edad",
            "Công việc chưa xong ở độ tuổi này",
        ],
        Label::NotesUpdated => ["Notes updated", "Notas actualizadas", "Đã cập nhật ghi chú"],
        Label::NotesCleared => ["Notes cleared", "Notas borradas", "Đã xóa ghi chú"],
        Label::ClearNotes => ["clear notes", "borrar notas", "xóa ghi chú"],
        Label::Quit => ["quit", "salir", "thoát"],
    }
}
