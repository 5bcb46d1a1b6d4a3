//! Translation catalog: every localized UI phrase, one table per language.
//!
//! The phrase set is declared once below. From that single list the macro
//! derives both the [`TranslationStrings`] struct (one field per phrase, so a
//! table missing a phrase does not compile) and the [`TranslationKey`] enum for
//! key-based access.

use crate::i18n::LanguageCode;

macro_rules! translation_catalog {
    ($($field:ident => $variant:ident : $name:literal,)*) => {
        /// All localized UI strings for one language.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct TranslationStrings {
            $(pub $field: &'static str,)*
        }

        /// Identifier of one UI phrase.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum TranslationKey {
            $($variant,)*
        }

        impl TranslationKey {
            /// Every key, in catalog order.
            pub const ALL: &'static [TranslationKey] = &[$(TranslationKey::$variant,)*];

            /// The camelCase phrase name used by the UI (e.g. "jobsNearYou").
            pub fn name(&self) -> &'static str {
                match self {
                    $(TranslationKey::$variant => $name,)*
                }
            }

            /// Parse a camelCase phrase name.
            pub fn from_name(name: &str) -> Option<TranslationKey> {
                match name {
                    $($name => Some(TranslationKey::$variant),)*
                    _ => None,
                }
            }
        }

        impl TranslationStrings {
            /// Phrase for a key.
            pub fn get(&self, key: TranslationKey) -> &'static str {
                match key {
                    $(TranslationKey::$variant => self.$field,)*
                }
            }
        }
    };
}

translation_catalog! {
    // Onboarding
    welcome => Welcome: "welcome",
    select_language => SelectLanguage: "selectLanguage",
    next => Next: "next",
    back => Back: "back",
    submit => Submit: "submit",

    // Profile
    your_name => YourName: "yourName",
    phone_number => PhoneNumber: "phoneNumber",
    village => Village: "village",
    can_you_read => CanYouRead: "canYouRead",
    yes => Yes: "yes",
    no => No: "no",

    // Work preferences
    how_many_hours => HowManyHours: "howManyHours",
    work_type => WorkType: "workType",
    from_home => FromHome: "fromHome",
    go_to_workplace => GoToWorkplace: "goToWorkplace",
    both => Both: "both",

    // Skills
    learn_skills => LearnSkills: "learnSkills",
    earn_per_month => EarnPerMonth: "earnPerMonth",
    start_learning => StartLearning: "startLearning",
    continue_label => Continue: "continue",
    completed => Completed: "completed",

    // Lessons
    step => Step: "step",
    of => Of: "of",
    mark_complete => MarkComplete: "markComplete",
    next_step => NextStep: "nextStep",
    congratulations => Congratulations: "congratulations",
    course_complete => CourseComplete: "courseComplete",
    download_certificate => DownloadCertificate: "downloadCertificate",

    // Jobs
    jobs_near_you => JobsNearYou: "jobsNearYou",
    new_jobs => NewJobs: "newJobs",
    per_month => PerMonth: "perMonth",
    hours_per_day => HoursPerDay: "hoursPerDay",
    view_details => ViewDetails: "viewDetails",
    apply => Apply: "apply",
    applied => Applied: "applied",

    // Applications
    my_applications => MyApplications: "myApplications",
    waiting => Waiting: "waiting",
    contacted => Contacted: "contacted",
    hired => Hired: "hired",
    rejected => Rejected: "rejected",

    // Common
    home => Home: "home",
    profile => Profile: "profile",
    notifications => Notifications: "notifications",
    loading => Loading: "loading",
    error => Error: "error",
    try_again => TryAgain: "tryAgain",
}

impl TranslationStrings {
    /// Look up the table for a language. Total over [`LanguageCode`].
    pub fn for_language(language: LanguageCode) -> &'static TranslationStrings {
        match language {
            LanguageCode::Hindi => &HINDI_STRINGS,
            LanguageCode::English => &ENGLISH_STRINGS,
            LanguageCode::Tamil => &TAMIL_STRINGS,
        }
    }

    /// `(key, phrase)` pairs in catalog order.
    pub fn entries(&self) -> impl Iterator<Item = (TranslationKey, &'static str)> + '_ {
        TranslationKey::ALL.iter().map(move |&key| (key, self.get(key)))
    }
}

// ==================== Hindi Strings ====================

pub const HINDI_STRINGS: TranslationStrings = TranslationStrings {
    // Onboarding
    welcome: "स्वागत है",
    select_language: "आप कौन सी भाषा बोलती हैं?",
    next: "आगे बढ़ें",
    back: "पीछे जाएं",
    submit: "भेजें",

    // Profile
    your_name: "आपका नाम",
    phone_number: "फोन नंबर",
    village: "गाँव / शहर",
    can_you_read: "क्या आप पढ़ सकती हैं?",
    yes: "हाँ",
    no: "नहीं",

    // Work preferences
    how_many_hours: "आप दिन में कितने घंटे काम कर सकती हैं?",
    work_type: "आप कैसा काम करना चाहती हैं?",
    from_home: "घर से",
    go_to_workplace: "काम की जगह जाकर",
    both: "दोनों ठीक हैं",

    // Skills
    learn_skills: "नया हुनर सीखें",
    earn_per_month: "महीने में कमाएं",
    start_learning: "सीखना शुरू करें",
    continue_label: "जारी रखें",
    completed: "पूरा हो गया",

    // Lessons
    step: "कदम",
    of: "में से",
    mark_complete: "पूरा करें",
    next_step: "अगला कदम",
    congratulations: "बधाई हो!",
    course_complete: "आपने कोर्स पूरा कर लिया!",
    download_certificate: "सर्टिफिकेट डाउनलोड करें",

    // Jobs
    jobs_near_you: "आपके पास की नौकरियां",
    new_jobs: "नई नौकरियां",
    per_month: "प्रति महीना",
    hours_per_day: "घंटे प्रतिदिन",
    view_details: "विवरण देखें",
    apply: "आवेदन करें",
    applied: "आवेदन भेज दिया",

    // Applications
    my_applications: "मेरे आवेदन",
    waiting: "प्रतीक्षा में",
    contacted: "संपर्क किया गया",
    hired: "नौकरी मिल गई",
    rejected: "अस्वीकार",

    // Common
    home: "होम",
    profile: "प्रोफाइल",
    notifications: "सूचनाएं",
    loading: "लोड हो रहा है...",
    error: "कुछ गलत हो गया",
    try_again: "फिर से कोशिश करें",
};

// ==================== English Strings ====================

pub const ENGLISH_STRINGS: TranslationStrings = TranslationStrings {
    // Onboarding
    welcome: "Welcome",
    select_language: "Which language do you speak?",
    next: "Next",
    back: "Back",
    submit: "Submit",

    // Profile
    your_name: "Your Name",
    phone_number: "Phone Number",
    village: "Village / City",
    can_you_read: "Can you read text?",
    yes: "Yes",
    no: "No",

    // Work preferences
    how_many_hours: "How many hours per day can you work?",
    work_type: "What type of work do you want?",
    from_home: "From Home",
    go_to_workplace: "Go to Workplace",
    both: "Both are OK",

    // Skills
    learn_skills: "Learn New Skills",
    earn_per_month: "Earn per month",
    start_learning: "Start Learning",
    continue_label: "Continue",
    completed: "Completed",

    // Lessons
    step: "Step",
    of: "of",
    mark_complete: "Mark Complete",
    next_step: "Next Step",
    congratulations: "Congratulations!",
    course_complete: "You completed the course!",
    download_certificate: "Download Certificate",

    // Jobs
    jobs_near_you: "Jobs Near You",
    new_jobs: "New Jobs",
    per_month: "per month",
    hours_per_day: "hours per day",
    view_details: "View Details",
    apply: "Apply",
    applied: "Applied",

    // Applications
    my_applications: "My Applications",
    waiting: "Waiting",
    contacted: "Contacted",
    hired: "Hired",
    rejected: "Rejected",

    // Common
    home: "Home",
    profile: "Profile",
    notifications: "Notifications",
    loading: "Loading...",
    error: "Something went wrong",
    try_again: "Try Again",
};

// ==================== Tamil Strings ====================

pub const TAMIL_STRINGS: TranslationStrings = TranslationStrings {
    // Onboarding
    welcome: "வரவேற்கிறோம்",
    select_language: "நீங்கள் எந்த மொழி பேசுகிறீர்கள்?",
    next: "அடுத்தது",
    back: "பின்னால்",
    submit: "சமர்ப்பிக்கவும்",

    // Profile
    your_name: "உங்கள் பெயர்",
    phone_number: "தொலைபேசி எண்",
    village: "கிராமம் / நகரம்",
    can_you_read: "நீங்கள் படிக்க முடியுமா?",
    yes: "ஆம்",
    no: "இல்லை",

    // Work preferences
    how_many_hours: "நீங்கள் ஒரு நாளைக்கு எத்தனை மணி நேரம் வேலை செய்ய முடியும்?",
    work_type: "நீங்கள் என்ன வகையான வேலை செய்ய விரும்புகிறீர்கள்?",
    from_home: "வீட்டில் இருந்து",
    go_to_workplace: "பணியிடத்திற்கு செல்லவும்",
    both: "இரண்டும் சரி",

    // Skills
    learn_skills: "புதிய திறன்களைக் கற்றுக்கொள்ளுங்கள்",
    earn_per_month: "மாதத்திற்கு சம்பாதிக்கவும்",
    start_learning: "கற்றலைத் தொடங்குங்கள்",
    continue_label: "தொடரவும்",
    completed: "முடிந்தது",

    // Lessons
    step: "படி",
    of: "இல்",
    mark_complete: "முடித்ததாகக் குறிக்கவும்",
    next_step: "அடுத்த படி",
    congratulations: "வாழ்த்துக்கள்!",
    course_complete: "நீங்கள் பாடத்தை முடித்துவிட்டீர்கள்!",
    download_certificate: "சான்றிதழைப் பதிவிறக்கவும்",

    // Jobs
    jobs_near_you: "உங்களுக்கு அருகில் உள்ள வேலைகள்",
    new_jobs: "புதிய வேலைகள்",
    per_month: "மாதத்திற்கு",
    hours_per_day: "ஒரு நாளைக்கு மணிநேரம்",
    view_details: "விவரங்களைக் காண்க",
    apply: "விண்ணப்பிக்கவும்",
    applied: "விண்ணப்பித்தது",

    // Applications
    my_applications: "எனது விண்ணப்பங்கள்",
    waiting: "காத்திருக்கிறது",
    contacted: "தொடர்பு கொண்டது",
    hired: "பணியமர்த்தப்பட்டது",
    rejected: "நிராகரிக்கப்பட்டது",

    // Common
    home: "முகப்பு",
    profile: "சுயவிவரம்",
    notifications: "அறிவிப்புகள்",
    loading: "ஏற்றுகிறது...",
    error: "ஏதோ தவறு நடந்தது",
    try_again: "மீண்டும் முயற்சிக்கவும்",
};
