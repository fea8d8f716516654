#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use job_auto_apply::config::{ApplicationConfig, Filters};
use job_auto_apply::error::LogError;
use job_auto_apply::services::PortalSelectors;
use job_auto_apply::{
    BrowserSession, Job, LocatorSpec, LogRecord, PageElement, Portal, QueryScope, ResultSink,
};

/// 会话上发生的可观察操作
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Navigate(String),
    Click(String),
    Input(String, String),
    OperatorReady,
    Close,
}

pub type EventLog = Arc<Mutex<Vec<Event>>>;

/// 假元素
#[derive(Clone)]
pub struct FakeElement {
    name: String,
    text: Option<String>,
    attrs: HashMap<String, String>,
    children: HashMap<LocatorSpec, Vec<FakeElement>>,
    fail_click: bool,
    panic_on_click: bool,
    cancel_on_click: Option<CancellationToken>,
    events: EventLog,
}

impl FakeElement {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            text: None,
            attrs: HashMap::new(),
            children: HashMap::new(),
            fail_click: false,
            panic_on_click: false,
            cancel_on_click: None,
            events: Arc::default(),
        }
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = Some(text.to_string());
        self
    }

    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn child(mut self, locator: LocatorSpec, element: FakeElement) -> Self {
        self.children.entry(locator).or_default().push(element);
        self
    }

    pub fn failing_click(mut self) -> Self {
        self.fail_click = true;
        self
    }

    pub fn panicking_click(mut self) -> Self {
        self.panic_on_click = true;
        self
    }

    /// 点击时触发中断（模拟申请过程中按下 Ctrl-C）
    pub fn interrupting_click(mut self, interrupt: &CancellationToken) -> Self {
        self.cancel_on_click = Some(interrupt.clone());
        self
    }

    fn bind(mut self, events: &EventLog) -> Self {
        self.events = events.clone();
        self.children = self
            .children
            .into_iter()
            .map(|(k, v)| (k, v.into_iter().map(|e| e.bind(events)).collect()))
            .collect();
        self
    }
}

#[async_trait]
impl QueryScope for FakeElement {
    type Element = FakeElement;

    async fn query(&self, locator: &LocatorSpec) -> Result<Vec<FakeElement>> {
        if !matches!(locator, LocatorSpec::Css(_)) {
            return Err(anyhow!("unsupported locator inside element: {locator}"));
        }
        Ok(self.children.get(locator).cloned().unwrap_or_default())
    }
}

#[async_trait]
impl PageElement for FakeElement {
    async fn click(&self) -> Result<()> {
        if self.panic_on_click {
            panic!("element {} exploded", self.name);
        }
        if self.fail_click {
            return Err(anyhow!("stale element reference: {}", self.name));
        }
        if let Some(interrupt) = &self.cancel_on_click {
            interrupt.cancel();
        }
        self.events
            .lock()
            .unwrap()
            .push(Event::Click(self.name.clone()));
        Ok(())
    }

    async fn send_input(&self, text: &str) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Event::Input(self.name.clone(), text.to_string()));
        Ok(())
    }

    async fn text(&self) -> Result<Option<String>> {
        Ok(self.text.clone())
    }

    async fn attribute(&self, name: &str) -> Result<Option<String>> {
        Ok(self.attrs.get(name).cloned())
    }
}

/// 假页面：定位方式 → 元素
#[derive(Clone, Default)]
pub struct FakePage {
    elements: HashMap<LocatorSpec, Vec<FakeElement>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, locator: LocatorSpec, element: FakeElement) -> Self {
        self.elements.entry(locator).or_default().push(element);
        self
    }

    /// LinkedIn 职位详情页：按需包含申请按钮、上传框和提交按钮
    pub fn job_page(apply: bool, upload: bool, submit: bool) -> Self {
        let s = linkedin();
        let mut page = Self::new();
        if apply {
            page = page.with(s.apply_button[0].clone(), FakeElement::new("apply"));
        }
        if upload {
            page = page.with(s.upload_input[0].clone(), FakeElement::new("upload"));
        }
        if submit {
            page = page.with(s.submit_button[0].clone(), FakeElement::new("submit"));
        }
        page
    }
}

/// 按 URL 提供页面的假浏览器会话
#[derive(Default)]
pub struct FakeSession {
    pages: HashMap<String, FakePage>,
    failing_urls: HashSet<String>,
    panic_on_login: bool,
    current: Mutex<Option<String>>,
    pub events: EventLog,
}

impl FakeSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, page: FakePage) -> Self {
        let events = self.events.clone();
        let bound = FakePage {
            elements: page
                .elements
                .into_iter()
                .map(|(k, v)| (k, v.into_iter().map(|e| e.bind(&events)).collect()))
                .collect(),
        };
        self.pages.insert(url.to_string(), bound);
        self
    }

    pub fn failing_navigation(mut self, url: &str) -> Self {
        self.failing_urls.insert(url.to_string());
        self
    }

    pub fn panicking_login(mut self) -> Self {
        self.panic_on_login = true;
        self
    }

    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    pub fn count(&self, predicate: impl Fn(&Event) -> bool) -> usize {
        self.events().iter().filter(|e| predicate(e)).count()
    }
}

#[async_trait]
impl QueryScope for FakeSession {
    type Element = FakeElement;

    async fn query(&self, locator: &LocatorSpec) -> Result<Vec<FakeElement>> {
        let current = self.current.lock().unwrap().clone();
        let Some(url) = current else {
            return Err(anyhow!("no page loaded"));
        };
        Ok(self
            .pages
            .get(&url)
            .and_then(|page| page.elements.get(locator).cloned())
            .unwrap_or_default())
    }
}

#[async_trait]
impl BrowserSession for FakeSession {
    async fn navigate(&self, url: &str) -> Result<()> {
        self.events
            .lock()
            .unwrap()
            .push(Event::Navigate(url.to_string()));
        if self.failing_urls.contains(url) {
            return Err(anyhow!("net::ERR_CONNECTION_RESET at {url}"));
        }
        *self.current.lock().unwrap() = Some(url.to_string());
        Ok(())
    }

    async fn await_operator_ready(&self, _prompt: &str) -> Result<()> {
        self.events.lock().unwrap().push(Event::OperatorReady);
        if self.panic_on_login {
            panic!("login prompt crashed");
        }
        Ok(())
    }

    async fn close(&self) -> Result<()> {
        self.events.lock().unwrap().push(Event::Close);
        Ok(())
    }
}

/// 内存结果日志
#[derive(Default)]
pub struct MemorySink {
    records: Mutex<Vec<LogRecord>>,
    fail: bool,
}

impl MemorySink {
    pub fn failing() -> Self {
        Self {
            records: Mutex::default(),
            fail: true,
        }
    }

    pub fn records(&self) -> Vec<LogRecord> {
        self.records.lock().unwrap().clone()
    }
}

#[async_trait]
impl ResultSink for MemorySink {
    async fn append(&self, record: &LogRecord) -> Result<(), LogError> {
        if self.fail {
            return Err(LogError::WriteFailed {
                path: "memory".into(),
                source: std::io::Error::new(std::io::ErrorKind::Other, "disk full"),
            });
        }
        self.records.lock().unwrap().push(record.clone());
        Ok(())
    }
}

pub fn linkedin() -> PortalSelectors {
    PortalSelectors::for_portal(Portal::LinkedIn)
}

/// 无延迟的测试配置
pub fn test_config(resume: Option<&Path>, max_applications: Option<usize>) -> ApplicationConfig {
    ApplicationConfig {
        delay_range_sec: (0.0, 0.0),
        resume_path: resume.map(Path::to_path_buf),
        max_applications: max_applications.and_then(NonZeroUsize::new),
        job_portal: "linkedin".to_string(),
        filters: Filters {
            keywords: vec!["rust".to_string()],
            location: "Remote".to_string(),
            experience_level: "entry".to_string(),
        },
        batch_delay_range_sec: (0.0, 0.0),
        form_settle_sec: 0.0,
        submit_settle_sec: 0.0,
        log_file: "unused.csv".into(),
    }
}

pub fn job(n: usize) -> Job {
    Job::new(
        Some(format!("Engineer {n}")),
        Some(format!("Company {n}")),
        job_url(n),
        Portal::LinkedIn,
    )
}

pub fn job_url(n: usize) -> String {
    format!("https://www.linkedin.com/jobs/view/{n}/")
}
