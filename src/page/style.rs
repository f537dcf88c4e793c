// Stylesheet injected once when the page mounts.

pub const STYLE_ID: &str = "ib-style";

pub const ROOT_STYLE: &str = "position:fixed; inset:0; display:flex; flex-direction:column; align-items:center; justify-content:center; overflow:hidden; background:linear-gradient(135deg,#1a0b2e 0%,#2d1b4e 50%,#0f0c29 100%); font-family:system-ui,sans-serif;";

pub const STYLESHEET: &str = r#"
.ib-center { z-index:50; display:flex; flex-direction:column; align-items:center; justify-content:center; transition:opacity 500ms; }
.ib-center.ib-hidden { opacity:0; pointer-events:none; }
.ib-icon { width:14rem; height:14rem; }
.ib-prompt { color:#f9a8d4; margin-top:1.5rem; font-weight:700; letter-spacing:0.3em; font-size:0.875rem; user-select:none; text-shadow:0 4px 8px rgba(0,0,0,0.6); }
.ib-bloom { position:absolute; inset:0; pointer-events:none; }
.ib-flower { position:absolute; transform-origin:bottom; animation-name:bloomSway; animation-iteration-count:infinite; animation-timing-function:ease-in-out; filter:drop-shadow(0 10px 8px rgba(0,0,0,0.4)); }
.ib-message-wrap { position:absolute; inset:0; display:flex; align-items:center; justify-content:center; z-index:200; pointer-events:none; }
.ib-message { white-space:pre-line; font-size:clamp(3rem,7vw,4.5rem); font-weight:900; text-align:center; padding:0 1rem; color:transparent; background:linear-gradient(90deg,#fbcfe8,#ffffff,#c7d2fe); -webkit-background-clip:text; background-clip:text; filter:drop-shadow(0 5px 5px rgba(0,0,0,0.9)); }
.ib-reset { position:absolute; bottom:2.5rem; left:50%; transform:translateX(-50%); pointer-events:auto; z-index:200; padding:0.75rem 2rem; border-radius:9999px; border:1px solid rgba(255,255,255,0.2); background:transparent; color:#fff; font-size:0.875rem; text-transform:uppercase; letter-spacing:0.3em; font-weight:700; backdrop-filter:blur(12px); box-shadow:0 0 15px rgba(0,0,0,0.5); cursor:pointer; transition:background-color 150ms; }
.ib-reset:hover { background:rgba(255,255,255,0.1); }
.iris-breathe { animation:irisBreathe 1.9s ease-in-out infinite; transform-origin:center; cursor:pointer; }
@keyframes irisBreathe {
  0% { transform:scale(1); }
  50% { transform:scale(1.08); }
  100% { transform:scale(1); }
}
.seed-drop { animation:seedDrop 0.9s cubic-bezier(0.2,0.9,0.2,1) forwards; transform-origin:center; }
@keyframes seedDrop {
  0% { transform:translateY(0px) scale(1) rotate(0deg); opacity:1; }
  65% { transform:translateY(180px) scale(0.92) rotate(12deg); opacity:1; }
  100% { transform:translateY(520px) scale(0.65) rotate(24deg); opacity:0; }
}
@keyframes bloomSway {
  0% { translate:0 0; rotate:0deg; opacity:0.85; }
  50% { translate:0 -6px; rotate:3deg; opacity:1; }
  100% { translate:0 0; rotate:0deg; opacity:0.85; }
}
"#;
