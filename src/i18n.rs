//! Static UI strings for the two supported languages.

/// UI language, picked once at startup from the system locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    Korean,
    #[default]
    English,
}

impl Lang {
    /// Detects the language from the system locale, defaulting to English.
    pub fn detect() -> Self {
        let locale = sys_locale::get_locale();
        let lang = locale
            .as_deref()
            .map(Self::from_locale)
            .unwrap_or_default();
        tracing::debug!(locale = ?locale, lang = ?lang, "Detected UI language");
        lang
    }

    /// Korean for any `ko*` locale tag (`ko`, `ko-KR`, `ko_KR.UTF-8`), English otherwise.
    pub fn from_locale(locale: &str) -> Self {
        if locale.get(..2).is_some_and(|p| p.eq_ignore_ascii_case("ko")) {
            Lang::Korean
        } else {
            Lang::English
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Lang::Korean => &KOREAN,
            Lang::English => &ENGLISH,
        }
    }
}

/// One language's string table.
#[derive(Debug)]
pub struct Strings {
    pub app_title: &'static str,
    pub open: &'static str,
    pub exit: &'static str,
    pub close: &'static str,
    pub settings: &'static str,
    pub usage: &'static str,
    pub save: &'static str,
    pub cancel: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
    pub save_confirm_title: &'static str,
    pub save_confirm: &'static str,
    pub interval_label: &'static str,
    pub reminder_body: &'static str,
    pub usage_title: &'static str,
    pub usage_text: &'static str,
    pub open_priority: &'static str,
}

static KOREAN: Strings = Strings {
    app_title: "Neck Protector",
    open: "열기",
    exit: "종료",
    close: "닫기",
    settings: "설정",
    usage: "사용법",
    save: "저장",
    cancel: "취소",
    yes: "예",
    no: "아니요",
    save_confirm_title: "저장 확인",
    save_confirm: "이 상태로 저장할까요?",
    interval_label: "시간(분) 설정",
    reminder_body: "목 스트레칭 시간입니다!",
    usage_title: "Neck Protector 사용법",
    usage_text: "이 프로그램은 일정 시간마다 알림을 보내 목 스트레칭을 도와줍니다.\n\n\
※ 주의: 특정 앱(게임, 전체화면 등)이 실행 중일 때는 알림이 표시되지 않을 수 있습니다.\n\
이 경우, 알림 우선순위 설정에서 'Neck Protector'를 허용 앱으로 추가해 주세요.",
    open_priority: "알림 우선순위 설정 열기",
};

static ENGLISH: Strings = Strings {
    app_title: "Neck Protector",
    open: "Open",
    exit: "Exit",
    close: "Close",
    settings: "Settings",
    usage: "Usage",
    save: "Save",
    cancel: "Cancel",
    yes: "Yes",
    no: "No",
    save_confirm_title: "Save Confirmation",
    save_confirm: "Save changes?",
    interval_label: "Time (minutes)",
    reminder_body: "Time to stretch your neck!",
    usage_title: "How to use Neck Protector",
    usage_text: "This program sends notifications to help you stretch your neck at regular intervals.\n\n\
※ Note: Notifications may not appear while certain apps (games, fullscreen, etc.) are running.\n\
In this case, please add 'Neck Protector' as an allowed app in your notification priority settings.",
    open_priority: "Open Priority Notification Settings",
};
