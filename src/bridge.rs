//! FFI to `wap.js`: handles to JavaScript values and the calls the counter makes on them.

use std::cell::Cell;
use std::mem;
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::slot;

//https://github.com/brson/mir2wasm/issues/33
//https://github.com/rust-lang/rust/issues/44006

#[link(wasm_import_module = "env")]
extern "C" {
    fn wap_get(instance: f64, from: f64, name_ptr: *const u8, name_len: usize, ret: *mut f64)
        -> u8;
    fn wap_clone(index: f64) -> f64;
    fn wap_unmap(index: f64);
    fn wap_set_string(
        instance: f64,
        object: f64,
        name_ptr: *const u8,
        name_len: usize,
        val_ptr: *const u8,
        val_len: usize,
    );
    fn wap_bound_call(
        instance: f64,
        index_of_object: f64,
        index_of_function: f64,
        num_args: u32,
        args_types: *const u8,
        args: *const f64,
        ret: *mut f64,
    ) -> u8;
}

// index 0 is never handed out by wap.js, so it doubles as "not started"
thread_local! {
    static INSTANCE: Cell<f64> = Cell::new(0.0);
    static GLOBAL: Cell<f64> = Cell::new(0.0);
}

#[derive(Debug)]
struct Index(f64);

/// Rc reference count to a JavaScript value held in the loader's table; unmapped when the
/// last `WapRc` drops.
#[derive(Debug, Clone)]
pub struct WapRc(Rc<Index>);

/// The main data communication type in and out of function calls.
#[derive(Debug, Clone)]
pub enum JsType {
    Null,
    Undefined,
    Boolean(bool),
    Number(f64),
    String(String),
    /// Object/function/Symbol
    Ref(WapRc),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
enum Tag {
    Null = 0,
    Undefined = 1,
    Boolean = 2,
    Number = 3,
    String = 4,
    Ref = 5,
}

impl Tag {
    fn from_raw(raw: u8) -> Tag {
        match raw {
            0 => Tag::Null,
            2 => Tag::Boolean,
            3 => Tag::Number,
            4 => Tag::String,
            5 => Tag::Ref,
            _ => Tag::Undefined,
        }
    }
}

impl Drop for Index {
    fn drop(&mut self) {
        unsafe { wap_unmap(self.0) };
    }
}

impl WapRc {
    fn new(index: f64) -> WapRc {
        WapRc(Rc::new(Index(index)))
    }
    fn raw_index(&self) -> f64 {
        (self.0).0
    }
}

impl JsType {
    /// The object behind a `Ref`; `name` labels the error otherwise.
    pub fn into_ref(self, name: &str) -> Result<WapRc> {
        match self {
            JsType::Ref(r) => Ok(r),
            _ => Err(Error::not_an_object(name)),
        }
    }
    pub fn into_string(self, name: &str) -> Result<String> {
        match self {
            JsType::String(s) => Ok(s),
            _ => Err(Error::not_a_string(name)),
        }
    }
}

impl From<&str> for JsType {
    fn from(s: &str) -> Self {
        JsType::String(s.to_string())
    }
}

impl From<WapRc> for JsType {
    fn from(r: WapRc) -> Self {
        JsType::Ref(r)
    }
}

fn raw_instance() -> f64 {
    INSTANCE.with(|i| i.get())
}

/// The `WebAssembly.Instance` this module runs in; its `exports` hold the callbacks.
pub fn webassembly_instance() -> WapRc {
    let index = unsafe { wap_clone(raw_instance()) };
    WapRc::new(index)
}

// alloc helpers from https://www.hellorust.com/demos/sha1/index.html
// https://news.ycombinator.com/item?id=15780702
/// Not to be called directly.
/// Used by js boilerplate.
#[no_mangle]
pub unsafe extern "C" fn wap_alloc(size: usize) -> *mut u8 {
    let mut buf = Vec::<u8>::with_capacity(size);
    let ptr = buf.as_mut_ptr();
    mem::forget(buf);
    ptr
}

/// Take back a string `wap.js` wrote into memory from `wap_alloc`.
unsafe fn take_string(slot_value: f64) -> String {
    let (ptr, len) = slot::unpack_str(slot_value);
    let len = len as usize;
    let bytes = Vec::from_raw_parts(ptr as usize as *mut u8, len, len);
    match String::from_utf8(bytes) {
        Ok(s) => s,
        Err(e) => String::from_utf8_lossy(e.as_bytes()).into_owned(),
    }
}

fn decode(tag: u8, ret64: f64) -> JsType {
    match Tag::from_raw(tag) {
        Tag::Null => JsType::Null,
        Tag::Undefined => JsType::Undefined,
        Tag::Boolean => JsType::Boolean(ret64 != 0.0),
        Tag::Number => JsType::Number(ret64),
        Tag::String => JsType::String(unsafe { take_string(ret64) }),
        Tag::Ref => JsType::Ref(WapRc::new(ret64)),
    }
}

pub fn get(from: &WapRc, name: &str) -> JsType {
    let mut ret64 = 0.0f64;
    let tag = unsafe {
        wap_get(
            raw_instance(),
            from.raw_index(),
            name.as_ptr(),
            name.len(),
            &mut ret64,
        )
    };
    decode(tag, ret64)
}

/// Assign a string to `object[name]`.
pub fn set_string(object: &WapRc, name: &str, value: &str) {
    unsafe {
        wap_set_string(
            raw_instance(),
            object.raw_index(),
            name.as_ptr(),
            name.len(),
            value.as_ptr(),
            value.len(),
        );
    }
}

/// Call `function` with `this` bound to `object`.
pub fn bound_call(object: &WapRc, function: &WapRc, args: &[JsType]) -> JsType {
    // string args point into `args` itself, which outlives the call
    let (tags, slots): (Vec<u8>, Vec<f64>) = args
        .iter()
        .map(|arg| match arg {
            JsType::Null => (Tag::Null as u8, 0.0),
            JsType::Undefined => (Tag::Undefined as u8, 0.0),
            JsType::Boolean(b) => (Tag::Boolean as u8, if *b { 1.0 } else { 0.0 }),
            JsType::Number(n) => (Tag::Number as u8, *n),
            JsType::String(s) => (
                Tag::String as u8,
                slot::pack_str(s.as_ptr() as usize as u32, s.len() as u32),
            ),
            JsType::Ref(r) => (Tag::Ref as u8, r.raw_index()),
        })
        .unzip();

    let mut ret64 = 0.0f64;
    let tag = unsafe {
        wap_bound_call(
            raw_instance(),
            object.raw_index(),
            function.raw_index(),
            args.len() as u32,
            tags.as_ptr(),
            slots.as_ptr(),
            &mut ret64,
        )
    };
    decode(tag, ret64)
}

/// Look up `name` on `object` and call it as a method.
pub fn method_call(object: &WapRc, name: &str, args: &[JsType]) -> Result<JsType> {
    let function = get(object, name).into_ref(name)?;
    Ok(bound_call(object, &function, args))
}

/// JavaScript's global object, once `wap_begin` has run.
pub fn global() -> Option<WapRc> {
    let index = GLOBAL.with(|g| g.get());
    if index == 0.0 {
        return None;
    }
    Some(WapRc::new(unsafe { wap_clone(index) }))
}

/// Not to be called directly.
/// Used by wap_begin macro.
pub unsafe fn wap_begin_init(instance: f64, global: f64) -> WapRc {
    INSTANCE.with(|i| i.set(instance));
    // a private mapping that lives as long as the module
    GLOBAL.with(|g| g.set(wap_clone(global)));
    WapRc::new(global)
}

/// Starting point from the boilerplate wap.js into the wasm. Takes a function whose argument is
/// a WapRc to JavaScript's global object.
#[macro_export]
macro_rules! wap_begin {
    ($fn:expr) => {
#[no_mangle]
pub extern "C" fn wap_begin(instance: f64, global: f64) {
    assert_eq!(::std::mem::size_of::<usize>(), 4);
    assert_eq!(::std::mem::size_of::<*mut u8>(), 4);

    let global = unsafe { $crate::bridge::wap_begin_init(instance, global) };

    let f = $fn;
    f(global);
}
    };
}
